// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), appels de fonctions compris
// - L’évaluation (eval.rs) consomme ensuite la RPN avec une pile de valeurs
//
// Règles:
// - Ident(name) suivi de '(' => appel ; l’arité est comptée (virgules) et sortie avec l’appel
// - Ident(name) seul         => constante (résolue dans la portée)
// - Moins unaire : opérateur préfixe `Neg`, plus fort que * / % mais plus faible que **
//   (-2**2 = -4, 2**-1 = 0.5) ; le plus unaire est ignoré
// - ** associatif à droite

use super::erreur::{CauseEval, ErreurCalc};
use super::jetons::Tok;

/// Garde-fou : imbrication maximale de parenthèses.
const PROFONDEUR_MAX: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBin {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl OpBin {
    pub fn appliquer(self, a: f64, b: f64) -> f64 {
        match self {
            OpBin::Add => a + b,
            OpBin::Sub => a - b,
            OpBin::Mul => a * b,
            OpBin::Div => a / b,
            OpBin::Mod => a % b,
            OpBin::Pow => a.powf(b),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Ident(String),
    Neg,
    Binaire(OpBin),
    Appel { nom: String, nb_args: usize },
}

/// Éléments de la pile d’opérateurs.
#[derive(Debug)]
enum Pile {
    Bin(OpBin),
    Neg,
    Fonction(String),
    Ouvrante { appel: bool },
}

const PREC_NEG: i32 = 3;

fn precedence(op: OpBin) -> i32 {
    match op {
        OpBin::Add | OpBin::Sub => 1,
        OpBin::Mul | OpBin::Div | OpBin::Mod => 2,
        OpBin::Pow => 4,
    }
}

fn is_right_associative(op: OpBin) -> bool {
    matches!(op, OpBin::Pow)
}

fn op_binaire(t: &Tok) -> Option<OpBin> {
    match t {
        Tok::Plus => Some(OpBin::Add),
        Tok::Minus => Some(OpBin::Sub),
        Tok::Star => Some(OpBin::Mul),
        Tok::Slash => Some(OpBin::Div),
        Tok::Percent => Some(OpBin::Mod),
        Tok::Puissance => Some(OpBin::Pow),
        _ => None,
    }
}

fn syntaxe(msg: &'static str) -> ErreurCalc {
    CauseEval::Syntaxe(msg).into()
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("pow"), LPar, Num(2), Virgule, Num(3), RPar, Star, Num(4)]
///   rpn:    [Num(2), Num(3), Appel{pow, 2}, Num(4), Binaire(Mul)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurCalc> {
    if tokens.is_empty() {
        return Err(CauseEval::ExpressionVide.into());
    }

    let mut out: Vec<Rpn> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();

    // Une entrée par appel ouvert : nombre de virgules vues.
    let mut virgules: Vec<usize> = Vec::new();
    let mut profondeur = 0usize;

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les juxtapositions invalides.
    let mut prev_was_value = false;

    let mut it = tokens.iter().peekable();
    while let Some(tok) = it.next() {
        match tok {
            Tok::Num(v) => {
                if prev_was_value {
                    return Err(syntaxe("valeur inattendue"));
                }
                out.push(Rpn::Num(*v));
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(syntaxe("valeur inattendue"));
                }
                if matches!(it.peek(), Some(Tok::LPar)) {
                    // appel : la fonction attend sous sa parenthèse
                    it.next();
                    ops.push(Pile::Fonction(name.clone()));
                    ouvrir(&mut ops, &mut profondeur, true)?;
                    virgules.push(0);
                    prev_was_value = false;
                } else {
                    out.push(Rpn::Ident(name.clone()));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(syntaxe("valeur inattendue"));
                }
                ouvrir(&mut ops, &mut profondeur, false)?;
                prev_was_value = false;
            }

            Tok::Virgule => {
                if !prev_was_value {
                    return Err(syntaxe("argument vide"));
                }
                depile_jusqu_a_ouvrante(&mut ops, &mut out);
                match (ops.last(), virgules.last_mut()) {
                    (Some(Pile::Ouvrante { appel: true }), Some(n)) => *n += 1,
                    _ => return Err(syntaxe("virgule hors d’un appel")),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                depile_jusqu_a_ouvrante(&mut ops, &mut out);
                let Some(Pile::Ouvrante { appel }) = ops.pop() else {
                    return Err(CauseEval::ParentheseInattendue.into());
                };
                profondeur -= 1;

                if appel {
                    let n = virgules.pop().unwrap_or(0);
                    let nb_args = match (prev_was_value, n) {
                        (true, n) => n + 1,
                        (false, 0) => 0,
                        (false, _) => return Err(syntaxe("argument vide")),
                    };
                    let Some(Pile::Fonction(nom)) = ops.pop() else {
                        return Err(syntaxe("appel sans fonction"));
                    };
                    out.push(Rpn::Appel { nom, nb_args });
                } else if !prev_was_value {
                    return Err(syntaxe("parenthèses vides"));
                }

                prev_was_value = true;
            }

            // préfixes : - unaire (Neg), + unaire (ignoré)
            Tok::Minus if !prev_was_value => ops.push(Pile::Neg),
            Tok::Plus if !prev_was_value => {}

            _ => {
                let Some(op) = op_binaire(tok) else {
                    return Err(syntaxe("jeton inattendu"));
                };
                if !prev_was_value {
                    return Err(syntaxe("opérateur sans opérande"));
                }

                // dépile tant que la précédence/associativité l’exige
                // (jamais à travers une parenthèse ouvrante)
                loop {
                    let p_top = match ops.last() {
                        Some(Pile::Bin(top)) => precedence(*top),
                        Some(Pile::Neg) => PREC_NEG,
                        _ => break,
                    };
                    let p_tok = precedence(op);

                    let doit_pop = if is_right_associative(op) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop {
                        break;
                    }
                    sortir_sommet(&mut ops, &mut out);
                }

                ops.push(Pile::Bin(op));
                prev_was_value = false;
            }
        }
    }

    if ops.iter().any(|p| matches!(p, Pile::Ouvrante { .. })) {
        return Err(CauseEval::ParentheseNonFermee.into());
    }
    if !prev_was_value {
        return Err(syntaxe("expression incomplète"));
    }

    // vide la pile ops (plus que des opérateurs)
    depile_jusqu_a_ouvrante(&mut ops, &mut out);

    Ok(out)
}

fn ouvrir(ops: &mut Vec<Pile>, profondeur: &mut usize, appel: bool) -> Result<(), ErreurCalc> {
    *profondeur += 1;
    if *profondeur > PROFONDEUR_MAX {
        return Err(CauseEval::ProfondeurExcessive.into());
    }
    ops.push(Pile::Ouvrante { appel });
    Ok(())
}

/// Sort le sommet s’il s’agit d’un opérateur (binaire ou Neg).
fn sortir_sommet(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) {
    match ops.pop() {
        Some(Pile::Bin(op)) => out.push(Rpn::Binaire(op)),
        Some(Pile::Neg) => out.push(Rpn::Neg),
        Some(autre) => ops.push(autre),
        None => {}
    }
}

/// Sort les opérateurs jusqu’à la parenthèse ouvrante la plus proche (non retirée).
fn depile_jusqu_a_ouvrante(ops: &mut Vec<Pile>, out: &mut Vec<Rpn>) {
    while matches!(ops.last(), Some(Pile::Bin(_) | Pile::Neg)) {
        sortir_sommet(ops, out);
    }
}
