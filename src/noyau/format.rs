// src/noyau/format.rs
//
// Affichage du résultat
// ---------------------
// 14 chiffres significatifs, puis écriture décimale la plus courte :
// supprime le “bruit” binaire (0.1 + 0.2 => 0.3, pas 0.30000000000000004).
// Toute valeur non finie s’écrit `NaN`, texte lié dans la portée (réévaluable).

/// Précision d’affichage (chiffres significatifs).
const CHIFFRES_SIGNIFICATIFS: usize = 14;

/// Texte d’un résultat indéfini.
pub const TEXTE_NAN: &str = "NaN";

/// Texte affiché pour un résultat numérique.
pub fn format_resultat(v: f64) -> String {
    if !v.is_finite() {
        return TEXTE_NAN.to_string();
    }

    let arrondi = arrondir_significatifs(v, CHIFFRES_SIGNIFICATIFS);

    // -0 s’affiche 0
    if arrondi == 0.0 {
        return "0".to_string();
    }
    format!("{arrondi}")
}

/// Arrondi décimal à `chiffres` significatifs (via l’écriture scientifique).
fn arrondir_significatifs(v: f64, chiffres: usize) -> f64 {
    let txt = format!("{:.*e}", chiffres.saturating_sub(1), v);
    txt.parse::<f64>().unwrap_or(v)
}
