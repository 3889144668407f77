// src/noyau/bibliotheque.rs
//
// Bibliothèque numérique (f64)
// ----------------------------
// - fonctions standard : abs, sqrt, exp, ln, log, pow, rand
// - fact(x) : factorielle entière “tolérante” (NaN hors domaine)
// - trig sensible au mode d’angle : sin/cos/tan (entrée) et asin/acos/atan (sortie)
//
// Les enveloppes trig sont construites À CHAQUE évaluation (le mode peut changer
// entre deux appels) : voir portee.rs.

use num_traits::ToPrimitive;

/// Écart maximal toléré entre x et l’entier le plus proche pour fact(x).
const TOLERANCE_ENTIER: f64 = 1e-12;

/// Au-delà, n! dépasse f64::MAX.
const FACT_MAX: u64 = 170;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Rad,
    Deg,
}

impl ModeAngle {
    pub fn bascule(self) -> Self {
        match self {
            ModeAngle::Rad => ModeAngle::Deg,
            ModeAngle::Deg => ModeAngle::Rad,
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Rad => "RAD",
            ModeAngle::Deg => "DEG",
        }
    }
}

/* ------------------------ Fonctions de base ------------------------ */

pub fn fact(x: f64) -> f64 {
    if !x.is_finite() || x < 0.0 {
        return f64::NAN;
    }
    if (x - x.round()).abs() > TOLERANCE_ENTIER {
        return f64::NAN;
    }

    let n = match x.round().to_u64() {
        Some(n) if n <= FACT_MAX => n,
        _ => return f64::INFINITY,
    };

    (2..=n).fold(1.0, |acc, i| acc * i as f64)
}

pub fn log10(x: f64) -> f64 {
    x.log10()
}

pub fn ln(x: f64) -> f64 {
    x.ln()
}

pub fn pow(a: f64, b: f64) -> f64 {
    a.powf(b)
}

/// Uniforme dans [0, 1).
pub fn aleatoire() -> f64 {
    rand::random::<f64>()
}

/* ------------------------ Trig selon le mode ------------------------ */

/// sin/cos/tan : en DEG, l’argument est converti en radians AVANT l’appel.
pub fn trig_entree(f: fn(f64) -> f64, mode: ModeAngle) -> impl Fn(f64) -> f64 {
    move |x| match mode {
        ModeAngle::Rad => f(x),
        ModeAngle::Deg => f(x.to_radians()),
    }
}

/// asin/acos/atan : en DEG, le résultat (radians) est converti en degrés.
pub fn trig_sortie(f: fn(f64) -> f64, mode: ModeAngle) -> impl Fn(f64) -> f64 {
    move |x| match mode {
        ModeAngle::Rad => f(x),
        ModeAngle::Deg => f(x).to_degrees(),
    }
}
