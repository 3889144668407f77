//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés :
//!   * jamais de panique, quelle que soit la saisie
//!   * une saisie hors liste blanche => CaractereInvalide, jamais une valeur
//!   * ce que la réécriture produit et que la validation accepte reste accepté
//!   * un échec ne modifie pas la session

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::eval::eval_expression;
use super::reecriture::reecrire;
use super::session::{Session, HISTORIQUE_MAX};
use super::validation::valider;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn choix<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

const ATOMES: &[&str] = &["0", "1", "2", "3", "0.5", ".25", "10", "pi", "e", "Ans", "π", "PI"];
const UNAIRES: &[&str] = &[
    "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "abs", "ln", "log", "exp", "fact", "√",
];
const BINAIRES: &[&str] = &["+", "-", "*", "/", "%", "^", " + ", " * "];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return rng.choix(ATOMES).to_string();
    }

    match rng.pick(8) {
        0 => rng.choix(ATOMES).to_string(),
        1 | 2 => format!(
            "{}{}{}",
            gen_expr(rng, depth - 1),
            rng.choix(BINAIRES),
            gen_expr(rng, depth - 1)
        ),
        3 => format!("({})", gen_expr(rng, depth - 1)),
        4 => format!("{}({})", rng.choix(UNAIRES), gen_expr(rng, depth - 1)),
        5 => format!("{}!", rng.choix(&["3", "4", "(2)", "(1+2)"])),
        6 => format!(
            "pow({}, {})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        // multiplication implicite
        _ => format!(
            "{}{}",
            rng.choix(&["2", "3", "(2)", ".5"]),
            rng.choix(&["pi", "e", "(3)", "sin(1)"])
        ),
    }
}

/// Texte arbitraire : alphabet large (dont caractères hors liste blanche).
fn gen_bruit(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '9', '.', ',', '+', '-', '*', '/', '%', '^', '(', ')', '!', ' ', 'a', 'e', 'p',
        'i', 's', 'n', '_', 'π', '√', ';', '=', '"', '{', '$', 'é',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn est_autorise(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '+' | '-' | '*' | '/' | '%' | '(' | ')' | '.' | ',' | '_')
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_grammaire_bien_formee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let session = Session::default();

    let mut seen_ok = 0usize;
    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match eval_expression(&expr, &session) {
            Ok(_) => seen_ok += 1,
            Err(e) => panic!("erreur non attendue: expr={expr:?} err={e}"),
        }
    }

    assert_eq!(seen_ok, 200);
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let session = Session::default();

    let mut seen_invalides = 0usize;
    for i in 0..400 {
        budget(t0, max);

        let brut = gen_bruit(&mut rng, 1 + i % 24);
        let reecrite = reecrire(&brut);
        let resultat = eval_expression(&brut, &session);

        if reecrite.chars().all(est_autorise) {
            // revalidation stable
            let une = valider(&reecrite).unwrap_or_else(|e| panic!("brut={brut:?} err={e}"));
            assert_eq!(valider(une), Ok(une));
            assert!(
                !matches!(resultat, Err(ErreurCalc::CaractereInvalide { .. })),
                "brut={brut:?}"
            );
        } else {
            assert!(
                matches!(resultat, Err(ErreurCalc::CaractereInvalide { .. })),
                "brut={brut:?} reecrite={reecrite:?} resultat={resultat:?}"
            );
            seen_invalides += 1;
        }
    }

    assert!(seen_invalides > 0, "aucune saisie invalide: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);
    let session = Session::default();

    for _ in 0..50 {
        let ea = gen_expr(&mut a, 3);
        let eb = gen_expr(&mut b, 3);
        assert_eq!(ea, eb);

        // rand() absent du générateur => même entrée, même sortie
        let va = eval_expression(&ea, &session).map(f64::to_bits);
        let vb = eval_expression(&eb, &session).map(f64::to_bits);
        assert_eq!(va, vb, "expr={ea:?}");
    }
}

#[test]
fn fuzz_safe_session_invariants() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5E55_u64);
    let mut s = Session::default();

    for i in 0..300 {
        budget(t0, max);

        let brut = if i % 3 == 0 {
            gen_bruit(&mut rng, 8)
        } else {
            gen_expr(&mut rng, 2)
        };

        let ans = s.dernier_resultat().to_bits();
        let memoire = s.memoire().to_bits();
        let taille = s.taille_historique();

        match s.egal(&brut) {
            Ok(r) => {
                let derniere = s.historique().last().map(|e| e.resultat.as_str());
                assert_eq!(derniere, Some(r.texte.as_str()));
                assert_eq!(s.taille_historique(), (taille + 1).min(HISTORIQUE_MAX));
            }
            Err(_) => {
                assert_eq!(s.dernier_resultat().to_bits(), ans);
                assert_eq!(s.taille_historique(), taille);
            }
        }
        assert_eq!(s.memoire().to_bits(), memoire);
        assert!(s.taille_historique() <= HISTORIQUE_MAX);
    }
}
