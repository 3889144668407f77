//! Portée d’évaluation : identifiant -> constante ou fonction.
//!
//! Reconstruite à chaque évaluation à partir du mode d’angle et de `Ans`.
//! Lecture seule pendant l’évaluation ; ne modifie jamais la session.

use std::collections::HashMap;
use std::f64::consts;

use super::bibliotheque::{self as bib, trig_entree, trig_sortie, ModeAngle};

pub type Corps = Box<dyn Fn(&[f64]) -> f64>;

/// Noms liés par `Portee::construire` (la réécriture s’en sert pour ne pas
/// découper un nom connu : `exp` n’est pas `e*xp`).
pub const NOMS_LIES: &[&str] = &[
    "pi", "e", "PI", "E", "NaN", "Ans", "rand", "abs", "sqrt", "exp", "ln", "log", "sin", "cos",
    "tan", "asin", "acos", "atan", "pow", "fact",
];

/// Fonction liée : arité fixe + corps.
pub struct Fonction {
    pub arite: usize,
    corps: Corps,
}

impl Fonction {
    fn unaire(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self {
            arite: 1,
            corps: Box::new(move |a: &[f64]| f(a[0])),
        }
    }

    fn binaire(f: impl Fn(f64, f64) -> f64 + 'static) -> Self {
        Self {
            arite: 2,
            corps: Box::new(move |a: &[f64]| f(a[0], a[1])),
        }
    }

    fn sans_argument(f: impl Fn() -> f64 + 'static) -> Self {
        Self {
            arite: 0,
            corps: Box::new(move |_: &[f64]| f()),
        }
    }

    /// Appelle la fonction ; `args.len()` a déjà été vérifié contre `arite`.
    pub fn appliquer(&self, args: &[f64]) -> f64 {
        (self.corps)(args)
    }
}

pub enum Liaison {
    Constante(f64),
    Fonction(Fonction),
}

pub struct Portee {
    liaisons: HashMap<&'static str, Liaison>,
}

impl Portee {
    /// Portée standard pour un mode d’angle et une dernière réponse donnés.
    pub fn construire(mode: ModeAngle, ans: f64) -> Self {
        use Liaison::{Constante, Fonction as F};

        let liaisons: HashMap<&'static str, Liaison> = [
            ("pi", Constante(consts::PI)),
            ("e", Constante(consts::E)),
            ("PI", Constante(consts::PI)),
            ("E", Constante(consts::E)),
            // texte affiché pour un résultat indéfini : doit se réévaluer
            ("NaN", Constante(f64::NAN)),
            ("Ans", Constante(ans)),
            ("rand", F(Fonction::sans_argument(bib::aleatoire))),
            ("abs", F(Fonction::unaire(f64::abs))),
            ("sqrt", F(Fonction::unaire(f64::sqrt))),
            ("exp", F(Fonction::unaire(f64::exp))),
            ("ln", F(Fonction::unaire(bib::ln))),
            ("log", F(Fonction::unaire(bib::log10))),
            ("sin", F(Fonction::unaire(trig_entree(f64::sin, mode)))),
            ("cos", F(Fonction::unaire(trig_entree(f64::cos, mode)))),
            ("tan", F(Fonction::unaire(trig_entree(f64::tan, mode)))),
            ("asin", F(Fonction::unaire(trig_sortie(f64::asin, mode)))),
            ("acos", F(Fonction::unaire(trig_sortie(f64::acos, mode)))),
            ("atan", F(Fonction::unaire(trig_sortie(f64::atan, mode)))),
            ("pow", F(Fonction::binaire(bib::pow))),
            ("fact", F(Fonction::unaire(bib::fact))),
        ]
        .into_iter()
        .collect();

        Self { liaisons }
    }

    pub fn get(&self, nom: &str) -> Option<&Liaison> {
        self.liaisons.get(nom)
    }
}
