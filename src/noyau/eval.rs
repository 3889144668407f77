//! Noyau : évaluation (pipeline réel)
//!
//! réécriture -> validation -> portée (mode + Ans) -> jetons -> RPN -> pile de valeurs
//!
//! Remarque : l’évaluation de la RPN est itérative (pile), donc aucune entrée
//! ne peut faire déborder la pile d’appels.

use tracing::debug;

use super::erreur::{CauseEval, ErreurCalc};
use super::jetons::{format_tokens, tokenize};
use super::portee::{Liaison, Portee};
use super::reecriture::reecrire;
use super::rpn::{to_rpn, Rpn};
use super::session::Session;
use super::validation::valider;

/// Valeur intermédiaire : un nombre, ou une référence de fonction non appliquée.
#[derive(Clone, Debug, PartialEq)]
enum Valeur {
    Nombre(f64),
    Fonction(String),
}

impl Valeur {
    fn nombre(self) -> Result<f64, ErreurCalc> {
        match self {
            Valeur::Nombre(v) => Ok(v),
            Valeur::Fonction(_) => Err(CauseEval::ValeurNonNumerique.into()),
        }
    }
}

/// API publique : évalue une saisie brute dans le contexte de la session.
///
/// - Ok(NaN) pour un résultat non fini ou indéfini (1/0, fact(-1), asin(2)) : pas une erreur.
/// - Err(CaractereInvalide) si la réécriture laisse un caractère hors liste blanche.
/// - Err(Evaluation) pour tout autre échec.
pub fn eval_expression(brut: &str, session: &Session) -> Result<f64, ErreurCalc> {
    match evaluer(brut, session) {
        Ok(v) => {
            debug!(entree = brut, resultat = v, "évaluation");
            Ok(v)
        }
        Err(e) => {
            debug!(entree = brut, erreur = %e, "évaluation refusée");
            Err(e)
        }
    }
}

fn evaluer(brut: &str, session: &Session) -> Result<f64, ErreurCalc> {
    // 1) Réécriture puis liste blanche
    let reecrite = reecrire(brut);
    let valide = valider(&reecrite)?;

    // 2) Jetons + RPN
    let jetons = tokenize(valide)?;
    debug!(jetons = %format_tokens(&jetons), "jetons");
    let rpn = to_rpn(&jetons)?;

    // 3) Portée fraîche (le mode ne change pas pendant l’évaluation)
    let portee = Portee::construire(session.mode(), session.dernier_resultat());

    // 4) Calcul
    let v = eval_rpn(&rpn, &portee)?;
    Ok(if v.is_finite() { v } else { f64::NAN })
}

/// Évalue une RPN contre une portée.
fn eval_rpn(rpn: &[Rpn], portee: &Portee) -> Result<f64, ErreurCalc> {
    let mut pile: Vec<Valeur> = Vec::with_capacity(rpn.len());

    for item in rpn {
        match item {
            Rpn::Num(v) => pile.push(Valeur::Nombre(*v)),

            Rpn::Ident(nom) => {
                let v = match portee.get(nom) {
                    Some(Liaison::Constante(v)) => Valeur::Nombre(*v),
                    Some(Liaison::Fonction(_)) => Valeur::Fonction(nom.clone()),
                    None => return Err(CauseEval::IdentifiantInconnu(nom.clone()).into()),
                };
                pile.push(v);
            }

            Rpn::Neg => {
                let a = depiler(&mut pile)?.nombre()?;
                pile.push(Valeur::Nombre(-a));
            }

            Rpn::Binaire(op) => {
                let b = depiler(&mut pile)?.nombre()?;
                let a = depiler(&mut pile)?.nombre()?;
                pile.push(Valeur::Nombre(op.appliquer(a, b)));
            }

            Rpn::Appel { nom, nb_args } => {
                if pile.len() < *nb_args {
                    return Err(CauseEval::Syntaxe("expression invalide").into());
                }
                let args = pile
                    .split_off(pile.len() - nb_args)
                    .into_iter()
                    .map(Valeur::nombre)
                    .collect::<Result<Vec<f64>, _>>()?;

                let f = match portee.get(nom) {
                    Some(Liaison::Fonction(f)) => f,
                    Some(Liaison::Constante(_)) => {
                        return Err(CauseEval::PasUneFonction(nom.clone()).into())
                    }
                    None => return Err(CauseEval::IdentifiantInconnu(nom.clone()).into()),
                };
                if f.arite != *nb_args {
                    return Err(CauseEval::Arite {
                        nom: nom.clone(),
                        attendu: f.arite,
                        recu: *nb_args,
                    }
                    .into());
                }

                pile.push(Valeur::Nombre(f.appliquer(&args)));
            }
        }
    }

    if pile.len() != 1 {
        return Err(CauseEval::Syntaxe("expression invalide").into());
    }
    depiler(&mut pile)?.nombre()
}

fn depiler(pile: &mut Vec<Valeur>) -> Result<Valeur, ErreurCalc> {
    pile.pop()
        .ok_or_else(|| CauseEval::Syntaxe("expression invalide").into())
}
