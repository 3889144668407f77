//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (affichage, ligne d’historique, session)
//! et offrir les actions des touches (=, C, AC, ⌫, MC/MR/M+/M-, DEG/RAD) sans logique d’affichage.
//!
//! Contrats :
//! - Toute évaluation passe par `Session` (noyau) ; aucune analyse ici.
//! - Un échec ne touche ni l’affichage ni la session : seule la ligne indique “Erreur”.
//! - Actions déterministes, sans effet de bord caché.

use tracing::debug;

use crate::noyau::{EntreeHistorique, Session};

/// Texte de la ligne d’historique après un échec.
pub const LIGNE_ERREUR: &str = "Erreur";

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub affichage: String,

    // --- sortie : “expr =” ou “Erreur” ---
    pub ligne_historique: String,

    // --- Ans, mémoire, historique, mode ---
    pub session: Session,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’affichage après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            affichage: String::new(),
            ligne_historique: String::new(),
            session: Session::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” ------------------------ */

    /// = : évalue l’affichage (ou Ans s’il est vide).
    pub fn egal(&mut self) {
        match self.session.egal(&self.affichage) {
            Ok(r) => {
                debug!(expression = %r.entree.expression, resultat = %r.entree.resultat, "historique");
                self.affichage = r.texte;
                self.ligne_historique = r.ligne;
            }
            Err(e) => {
                debug!(erreur = %e, "= refusé");
                self.ligne_historique = LIGNE_ERREUR.to_string();
            }
        }
        self.focus_entree = true;
    }

    /// C : efface l’affichage et la ligne d’historique.
    pub fn clear_entree(&mut self) {
        self.affichage.clear();
        self.ligne_historique.clear();
        self.focus_entree = true;
    }

    /// AC : comme C, et Ans revient à 0 (mémoire et historique conservés).
    pub fn tout_effacer(&mut self) {
        self.clear_entree();
        self.session.tout_effacer();
    }

    /// ⌫ : retire le dernier caractère.
    pub fn backspace(&mut self) {
        self.affichage.pop();
        self.focus_entree = true;
    }

    /// Insertion littérale en fin d’affichage (chiffre, opérateur, `sin(`, …).
    pub fn inserer(&mut self, texte: &str) {
        self.affichage.push_str(texte);
        self.focus_entree = true;
    }

    pub fn memoire_plus(&mut self) {
        self.session.memoire_plus(&self.affichage);
        self.focus_entree = true;
    }

    pub fn memoire_moins(&mut self) {
        self.session.memoire_moins(&self.affichage);
        self.focus_entree = true;
    }

    pub fn memoire_effacer(&mut self) {
        self.session.memoire_effacer();
        self.focus_entree = true;
    }

    /// MR : insère la valeur mémorisée.
    pub fn memoire_rappel(&mut self) {
        let texte = self.session.memoire_rappel();
        self.inserer(&texte);
    }

    /// DEG/RAD
    pub fn basculer_mode(&mut self) {
        self.session.basculer_mode();
        self.focus_entree = true;
    }

    pub fn vider_historique(&mut self) {
        self.session.vider_historique();
    }

    /// Clic sur une entrée : résultat dans l’affichage, expression dans la ligne.
    pub fn rappeler_historique(&mut self, entree: &EntreeHistorique) {
        self.affichage = entree.resultat.clone();
        self.ligne_historique = format!("{} =", entree.expression);
        self.focus_entree = true;
    }
}
