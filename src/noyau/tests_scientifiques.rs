//! Tests scientifiques (campagne) : propriétés du pipeline + limites contrôlées.
//!
//! But : vérifier les contrats observables sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées
//!
//! Notes :
//! - NaN est une VALEUR (1/0, fact(-1), asin(2)) : jamais une erreur.
//! - Le mode d’angle ne touche que la portée, jamais la réécriture.
//! - Aller-retour littéral -> résultat -> texte : à 14 chiffres significatifs près.

use std::time::{Duration, Instant};

use super::bibliotheque::ModeAngle;
use super::erreur::ErreurCalc;
use super::eval::eval_expression;
use super::format::format_resultat;
use super::reecriture::reecrire;
use super::session::{Session, HISTORIQUE_MAX};
use super::validation::valider;

fn session(mode: ModeAngle) -> Session {
    let mut s = Session::default();
    if s.mode() != mode {
        s.basculer_mode();
    }
    s
}

fn eval_ok(expr: &str, mode: ModeAngle) -> f64 {
    eval_expression(expr, &session(mode)).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, mode: ModeAngle, attendu: f64) {
    let v = eval_ok(expr, mode);
    assert!(
        (v - attendu).abs() < 1e-10,
        "expr={expr:?} mode={mode:?} obtenu={v} attendu={attendu}"
    );
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Réécriture / validation ------------------------ */

#[test]
fn sci_revalidation_toujours_acceptee() {
    for brut in [
        "2pi",
        "(2+3)!",
        "√(2)^2",
        "sin(30)! + 3(4)",
        "Ans * 2e",
        "  1 + 2  ",
    ] {
        let r = reecrire(brut);
        let une = valider(&r).unwrap_or_else(|e| panic!("brut={brut:?} err={e}"));
        assert_eq!(valider(une), Ok(une), "brut={brut:?}");
    }
}

#[test]
fn sci_reecriture_independante_du_mode() {
    // même texte => même réécriture ; seule l’évaluation diffère
    let r = reecrire("sin(90)");
    assert_eq!(r, "sin(90)");
    assert_proche(&r, ModeAngle::Deg, 1.0);
    assert_proche(&r, ModeAngle::Rad, 90f64.sin());
}

/* ------------------------ Propriétés numériques ------------------------ */

#[test]
fn sci_aller_retour_litteraux() {
    for n in [
        0.0,
        1.0,
        -1.0,
        42.0,
        0.5,
        -0.25,
        3.14159,
        1e-7,
        123456.789,
        1e15,
        1e21,
        0.1 + 0.2,
        std::f64::consts::PI,
    ] {
        let texte = format_resultat(n);
        let v = eval_ok(&texte, ModeAngle::Rad);
        assert_eq!(format_resultat(v), texte, "n={n}");
    }
}

#[test]
fn sci_multiplication_implicite_equivalente() {
    for (implicite, explicite) in [
        ("2pi", "2*pi"),
        ("(3)4", "(3)*4"),
        ("2(3)", "2*(3)"),
        ("3sin(1)", "3*sin(1)"),
        ("pi e", "pi*e"),
        ("(2)(3)(4)", "2*3*4"),
        ("πe", "pi*e"),
        ("eπ", "e*pi"),
        ("ππ", "pi*pi"),
        ("π√(4)", "pi*sqrt(4)"),
        ("πsin(1)", "pi*sin(1)"),
        ("eAns", "e*Ans"),
    ] {
        assert_eq!(
            eval_ok(implicite, ModeAngle::Rad),
            eval_ok(explicite, ModeAngle::Rad),
            "{implicite} vs {explicite}"
        );
    }
}

#[test]
fn sci_factorielles() {
    assert_eq!(eval_ok("5!", ModeAngle::Rad), 120.0);
    assert_eq!(eval_ok("(2+3)!", ModeAngle::Rad), 120.0);
    assert_eq!(eval_ok("0!", ModeAngle::Rad), 1.0);
    assert_proche("170!/169!", ModeAngle::Rad, 170.0);
    assert!(eval_ok("-1!", ModeAngle::Rad).is_nan());
    assert!(eval_ok("(-1)!", ModeAngle::Rad).is_nan());
    // sin(90°) = 1 => 1! = 1
    assert_proche("sin(90)!", ModeAngle::Deg, 1.0);
}

#[test]
fn sci_trig_degres_radians() {
    assert_proche("sin(90)", ModeAngle::Deg, 1.0);
    assert_proche("sin(pi/2)", ModeAngle::Rad, 1.0);
    assert_proche("cos(60)", ModeAngle::Deg, 0.5);
    assert_proche("tan(45)", ModeAngle::Deg, 1.0);
    assert_proche("asin(0.5)", ModeAngle::Deg, 30.0);
    assert_proche("acos(-1)", ModeAngle::Deg, 180.0);
    assert_proche("acos(-1)", ModeAngle::Rad, std::f64::consts::PI);
    assert_proche("sin(30)^2 + cos(30)^2", ModeAngle::Deg, 1.0);
}

#[test]
fn sci_nan_pas_erreur() {
    for expr in ["1/0", "0/0", "fact(-1)", "asin(2)", "ln(-1)", "log(0)", "sqrt(-4)"] {
        assert!(eval_ok(expr, ModeAngle::Rad).is_nan(), "expr={expr:?}");
    }
    assert_eq!(format_resultat(eval_ok("1/0", ModeAngle::Rad)), "NaN");
    // le texte affiché se réévalue
    assert!(eval_ok("NaN", ModeAngle::Rad).is_nan());
    assert!(eval_ok("NaN + 1", ModeAngle::Rad).is_nan());
}

#[test]
fn sci_injection_refusee() {
    for expr in [
        "alert('x')",
        "process.exit(0);",
        "constructor[\"x\"]",
        "a = 1",
        "1 + 2 // commentaire ?",
        "`rm -rf`",
        "${x}",
        "x => x",
    ] {
        let r = eval_expression(expr, &Session::default());
        assert!(
            matches!(r, Err(ErreurCalc::CaractereInvalide { .. })),
            "expr={expr:?} r={r:?}"
        );
    }
}

#[test]
fn sci_mots_inconnus_refuses_sans_execution() {
    // que des lettres : passe la liste blanche, échoue à la résolution
    for expr in ["import", "process", "window", "eval(1)", "Math"] {
        let r = eval_expression(expr, &Session::default());
        assert!(matches!(r, Err(ErreurCalc::Evaluation(_))), "expr={expr:?}");
    }
}

/* ------------------------ Session ------------------------ */

#[test]
fn sci_historique_101_evaluations() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut s = Session::default();
    for i in 1..=(HISTORIQUE_MAX + 1) {
        budget(t0, max);
        s.egal(&format!("{i}*1")).unwrap();
        assert!(s.taille_historique() <= HISTORIQUE_MAX);
    }

    let exprs: Vec<&str> = s.historique().map(|e| e.expression.as_str()).collect();
    assert!(!exprs.contains(&"1*1"));
    assert!(exprs.contains(&"101*1"));
    assert_eq!(exprs.len(), HISTORIQUE_MAX);
}

#[test]
fn sci_echec_preserve_ans_et_memoire() {
    let mut s = Session::default();
    s.egal("7").unwrap();
    s.memoire_plus("3");

    for mauvais in ["7+", "(", "sqrt", "x;y", "pow(1)", ")"] {
        assert!(s.egal(mauvais).is_err(), "mauvais={mauvais:?}");
        s.memoire_plus(mauvais);
        s.memoire_moins(mauvais);
    }

    assert_eq!(s.dernier_resultat(), 7.0);
    assert_eq!(s.memoire(), 3.0);
    assert_eq!(s.taille_historique(), 1);
}

#[test]
fn sci_nan_est_un_resultat_memorise() {
    let mut s = Session::default();
    let r = s.egal("0/0").unwrap();
    assert_eq!(r.texte, "NaN");
    assert!(s.dernier_resultat().is_nan());
    assert_eq!(s.taille_historique(), 1);
}

/* ------------------------ Limites ------------------------ */

#[test]
fn sci_longues_expressions_sans_debordement() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // longue chaîne plate
    let somme = vec!["1"; 5000].join("+");
    assert_eq!(eval_ok(&somme, ModeAngle::Rad), 5000.0);
    budget(t0, max);

    // longue chaîne de moins unaires (pile itérative)
    let negs = format!("{}5", "-".repeat(4000));
    assert_eq!(eval_ok(&negs, ModeAngle::Rad), 5.0);
    budget(t0, max);

    // imbrication au-delà du garde-fou : erreur propre, pas de panique
    let profond = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert!(matches!(
        eval_expression(&profond, &Session::default()),
        Err(ErreurCalc::Evaluation(_))
    ));
    budget(t0, max);
}
