// src/noyau/jetons.rs

use super::erreur::{CauseEval, ErreurCalc};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Constantes + fonctions : la portée décidera (sensible à la casse).
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Puissance, // **

    LPar,
    RPar,
    Virgule,
}

/// Tokenize une expression DÉJÀ validée.
/// Supporte:
/// - nombres décimaux (ex: 12, 1.5, .5, 2.) ; un seul point
/// - opérateurs + - * / % et ** (puissance)
/// - parenthèses ( ) et virgule (séparateur d’arguments)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]*
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '/' => Some(Tok::Slash),
            '%' => Some(Tok::Percent),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // `*` ou `**`
        if c == '*' {
            if i + 1 < chars.len() && chars[i + 1] == '*' {
                out.push(Tok::Puissance);
                i += 2;
            } else {
                out.push(Tok::Star);
                i += 1;
            }
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            out.push(Tok::Num(lire_nombre(&txt)?));
            continue;
        }

        return Err(ErreurCalc::CaractereInvalide {
            caractere: c,
            position: i,
        });
    }

    Ok(out)
}

/// `1.2.3` ou `.` seul : refusés.
fn lire_nombre(txt: &str) -> Result<f64, ErreurCalc> {
    let points = txt.matches('.').count();
    let chiffres = txt.chars().any(|c| c.is_ascii_digit());
    if points > 1 || !chiffres {
        return Err(CauseEval::NombreInvalide(txt.to_string()).into());
    }
    txt.parse::<f64>()
        .map_err(|_| CauseEval::NombreInvalide(txt.to_string()).into())
}

/// Format utilitaire (traces) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => v.to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::Puissance => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
