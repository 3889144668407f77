//! Noyau scientifique (flottants)
//!
//! Organisation interne :
//! - reecriture.rs   : π/√/^, factorielles, multiplication implicite
//! - validation.rs   : liste blanche de caractères
//! - jetons.rs       : tokenisation
//! - rpn.rs          : shunting-yard (unaire, `**` à droite, appels)
//! - portee.rs       : constantes + fonctions liées au mode et à Ans
//! - bibliotheque.rs : fact, log, DEG/RAD, rand
//! - eval.rs         : pipeline complet
//! - format.rs       : affichage à 14 chiffres significatifs
//! - session.rs      : Ans, mémoire, historique, mode
//! - erreur.rs       : taxonomie des erreurs

pub mod bibliotheque;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod portee;
pub mod reecriture;
pub mod rpn;
pub mod session;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use bibliotheque::ModeAngle;
pub use session::{EntreeHistorique, Session};
