// src/noyau/validation.rs
//
// Liste blanche de caractères (après réécriture)
// ----------------------------------------------
// Seule défense au niveau texte : rien d’autre que chiffres, opérateurs, parenthèses,
// point, virgule, blancs, lettres ASCII et `_` n’atteint l’analyseur.
// `^` n’y figure pas : la réécriture l’a déjà transformé en `**`.

use super::erreur::ErreurCalc;

fn est_autorise(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '+' | '-' | '*' | '/' | '%' | '(' | ')' | '.' | ',' | '_')
}

/// Valide une expression réécrite ; renvoie la même chaîne si elle est saine.
pub fn valider(expr: &str) -> Result<&str, ErreurCalc> {
    match expr.chars().enumerate().find(|(_, c)| !est_autorise(*c)) {
        Some((position, caractere)) => Err(ErreurCalc::CaractereInvalide {
            caractere,
            position,
        }),
        None => Ok(expr),
    }
}
