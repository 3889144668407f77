// src/noyau/reecriture.rs
//
// Réécriture textuelle (avant validation)
// ---------------------------------------
// Passes, dans cet ordre :
//   1) symboles      : π -> pi, √ -> sqrt, ^ -> **
//   2) factorielles  : X! -> fact(X)   (X = nombre, identifiant, appel ou parenthèse)
//   3) multiplication implicite : 2pi -> 2*pi, (3)4 -> (3)*4, 2(3) -> 2*(3), πe -> pi*e
//
// Fonction pure : le mode d’angle n’intervient pas ici (seulement dans la portée).
// Un échec de réécriture n’est jamais signalé ici : le texte mal formé reste tel quel
// et la validation (ou l’analyse) le rejette.

use super::portee::NOMS_LIES;

/// Opérateur puissance de la grammaire d’évaluation.
pub const OP_PUISSANCE: &str = "**";

/// Réécrit une saisie brute en grammaire stricte (appels de fonctions, `*` explicites).
pub fn reecrire(brut: &str) -> String {
    let s = brut.trim();
    if s.is_empty() {
        return String::new();
    }

    let s = substituer_symboles(s);
    let s = developper_factorielles(&s);
    inserer_multiplications(&s)
}

/* ------------------------ 1) Symboles ------------------------ */

pub fn substituer_symboles(s: &str) -> String {
    s.replace('π', "pi")
        .replace('√', "sqrt")
        .replace('^', OP_PUISSANCE)
}

/* ------------------------ 2) Factorielles ------------------------ */

/// Remplace chaque `X!` par `fact(X)`, du `!` le plus à gauche vers la droite.
///
/// Opérande vide ou parenthèse sans correspondance : on s’arrête et on laisse
/// le `!` en place (la validation le refusera).
pub fn developper_factorielles(expr: &str) -> String {
    let mut s: Vec<char> = expr.chars().collect();

    while let Some(i) = s.iter().position(|&c| c == '!') {
        let Some(debut) = debut_operande(&s, i) else {
            break;
        };

        let operande: String = s[debut..i].iter().collect();
        // pi(3)! => pi*fact((3)) : ne pas coller `fact` à l’identifiant qui précède
        let colle = debut > 0 && est_car_identifiant(s[debut - 1]);
        let prefixe = if colle { "*" } else { "" };
        let remplacement: Vec<char> = format!("{prefixe}fact({operande})").chars().collect();
        s.splice(debut..=i, remplacement);
    }

    s.into_iter().collect()
}

/// Début de l’opérande du `!` situé en `i` (None si vide / non apparié).
fn debut_operande(s: &[char], i: usize) -> Option<usize> {
    if i == 0 {
        return None;
    }

    if s[i - 1] == ')' {
        let ouvrante = parenthese_ouvrante(s, i - 1)?;
        return Some(debut_nom_fonction(s, ouvrante));
    }

    let mut debut = i;
    while debut > 0 && est_car_mot(s[debut - 1]) {
        debut -= 1;
    }
    if debut == i {
        return None;
    }

    // -1! => fact(-1) quand le moins est unaire
    if debut > 0 && s[debut - 1] == '-' && est_moins_unaire(s, debut - 1) {
        debut -= 1;
    }

    Some(debut)
}

/// Index du `(` qui ferme le `)` en `fermante` (scan vers la gauche).
fn parenthese_ouvrante(s: &[char], fermante: usize) -> Option<usize> {
    let mut profondeur = 0usize;
    let mut j = fermante + 1;

    while j > 0 {
        j -= 1;
        match s[j] {
            ')' => profondeur += 1,
            '(' => {
                profondeur -= 1;
                if profondeur == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
    }

    None
}

/// `sin(30)!` : l’opérande inclut le nom de fonction collé à la parenthèse.
/// Les constantes (`pi(3)`, `e(2)`) restent des multiplications implicites.
fn debut_nom_fonction(s: &[char], ouvrante: usize) -> usize {
    let mut debut = ouvrante;
    while debut > 0 && est_car_identifiant(s[debut - 1]) {
        debut -= 1;
    }

    // les chiffres en tête appartiennent au nombre qui précède (2sin(x) = 2*sin(x))
    while debut < ouvrante && s[debut].is_ascii_digit() {
        debut += 1;
    }

    let nom: String = s[debut..ouvrante].iter().collect();
    if nom.is_empty() || est_constante_implicite(&nom) {
        ouvrante
    } else {
        debut
    }
}

/// Un `-` est unaire en début de texte, ou après `(`, `,` ou un opérateur.
fn est_moins_unaire(s: &[char], moins: usize) -> bool {
    match s[..moins].iter().rev().find(|c| !c.is_whitespace()) {
        None => true,
        Some(c) => matches!(c, '(' | ',' | '+' | '-' | '*' | '/' | '%'),
    }
}

/* ------------------------ 3) Multiplication implicite ------------------------ */

/// Nature de ce qui précède la position courante.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gauche {
    Nombre,
    Constante,
    Identifiant,
    Fermante,
    Autre,
}

fn doit_multiplier(gauche: Gauche, c: char) -> bool {
    let debut_mot = c == '(' || c.is_ascii_alphabetic() || c == '_';
    match gauche {
        Gauche::Nombre | Gauche::Constante => debut_mot,
        Gauche::Fermante => debut_mot || c.is_ascii_digit() || c == '.',
        Gauche::Identifiant | Gauche::Autre => false,
    }
}

/// Insère `*` là où la multiplication est implicite.
/// Les blancs entre les deux membres disparaissent quand un `*` est inséré.
pub fn inserer_multiplications(expr: &str) -> String {
    let s: Vec<char> = expr.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);
    let mut blancs = String::new();
    let mut gauche = Gauche::Autre;
    let mut i = 0;

    while i < s.len() {
        let c = s[i];

        if c.is_whitespace() {
            blancs.push(c);
            i += 1;
            continue;
        }

        if doit_multiplier(gauche, c) {
            out.push('*');
            blancs.clear();
        } else {
            out.push_str(&blancs);
            blancs.clear();
        }

        let debut = i;
        if c.is_ascii_alphabetic() || c == '_' {
            while i < s.len() && est_car_identifiant(s[i]) {
                i += 1;
            }
            let mot: String = s[debut..i].iter().collect();
            let morceaux = decouper_constantes(&mot);
            out.push_str(&morceaux.join("*"));

            let dernier = morceaux.last().copied().unwrap_or_default();
            gauche = if est_constante_implicite(dernier) {
                Gauche::Constante
            } else {
                Gauche::Identifiant
            };
            continue;
        }

        gauche = if c.is_ascii_digit() || c == '.' {
            while i < s.len() && (s[i].is_ascii_digit() || s[i] == '.') {
                i += 1;
            }
            Gauche::Nombre
        } else {
            i += 1;
            if c == ')' {
                Gauche::Fermante
            } else {
                Gauche::Autre
            }
        };

        out.extend(&s[debut..i]);
    }

    out.push_str(&blancs);
    out
}

/// `pie` -> [pi, e], `pisqrt` -> [pi, sqrt], `eAns` -> [e, Ans].
///
/// Un nom lié n’est jamais découpé (`exp`, `Ans`, `sqrt`) ; on ne détache
/// `pi` / `e` en tête que si la suite commence par une lettre ou `_`.
fn decouper_constantes(mot: &str) -> Vec<&str> {
    let mut morceaux = Vec::new();
    let mut reste = mot;

    loop {
        let prefixe = ["pi", "e"].into_iter().find(|p| {
            !NOMS_LIES.contains(&reste)
                && reste.starts_with(p)
                && reste[p.len()..].starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        });
        match prefixe {
            Some(p) => {
                morceaux.push(&reste[..p.len()]);
                reste = &reste[p.len()..];
            }
            None => {
                morceaux.push(reste);
                return morceaux;
            }
        }
    }
}

/* ------------------------ Outils ------------------------ */

fn est_car_identifiant(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Caractères d’un opérande nu : nombre décimal ou identifiant.
fn est_car_mot(c: char) -> bool {
    est_car_identifiant(c) || c == '.'
}

fn est_constante_implicite(mot: &str) -> bool {
    matches!(mot, "pi" | "e")
}
