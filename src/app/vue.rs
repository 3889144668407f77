// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand l’affichage a le focus), Escape efface (app.rs)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Historique cliquable, le plus récent en haut
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::{EntreeHistorique, ModeAngle};

/// Hauteur max de la liste d’historique (le reste défile).
const HAUTEUR_HISTORIQUE: f32 = 180.0;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Calculatrice scientifique");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.ui_mode(ui);
                    });
                });
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_fonctions(ui);
                ui.add_space(6.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_mode(&mut self, ui: &mut egui::Ui) {
        let mode = self.session.mode();
        ui.monospace(mode.libelle());

        let mut deg = mode == ModeAngle::Deg;
        if ui.checkbox(&mut deg, "DEG").changed() {
            self.basculer_mode();
        }

        // indicateur mémoire non nulle
        if self.session.memoire() != 0.0 {
            ui.monospace("M");
        }
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        // Ligne “expr =” ou “Erreur”
        let ligne = if self.ligne_historique.is_empty() {
            " "
        } else {
            self.ligne_historique.as_str()
        };
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add(egui::Label::new(egui::RichText::new(ligne).monospace().weak()).truncate());
        });

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.affichage)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2sin(30)+5!, √2^2, pow(2, 10)")
                .id_source("affichage_edit")
                .font(egui::TextStyle::Heading)
                .horizontal_align(egui::Align::RIGHT),
        );

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue ---
        // singleline : Enter fait perdre le focus, d’où lost_focus().
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.egal();
        }

        ui.add_space(6.0);

        // Mémoire + effacements
        ui.horizontal(|ui| {
            self.bouton_action(ui, "MC", "Mémoire à zéro", Action::MemoireEffacer);
            self.bouton_action(ui, "MR", "Insère la mémoire", Action::MemoireRappel);
            self.bouton_action(ui, "M+", "Ajoute le résultat à la mémoire", Action::MemoirePlus);
            self.bouton_action(ui, "M-", "Retranche le résultat de la mémoire", Action::MemoireMoins);

            ui.separator();

            // Contrat: C = affichage + ligne ; AC = idem + Ans
            self.bouton_action(ui, "C", "Efface l’affichage", Action::ClearEntree);
            self.bouton_action(ui, "AC", "Efface tout (Ans = 0)", Action::ToutEffacer);
        });
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_fonctions")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "sin", "sin(");
                self.bouton_insert(ui, "cos", "cos(");
                self.bouton_insert(ui, "tan", "tan(");
                self.bouton_insert(ui, "ln", "ln(");
                self.bouton_insert(ui, "log", "log(");
                ui.end_row();

                self.bouton_insert(ui, "asin", "asin(");
                self.bouton_insert(ui, "acos", "acos(");
                self.bouton_insert(ui, "atan", "atan(");
                self.bouton_insert(ui, "exp", "exp(");
                self.bouton_insert(ui, "pow", "pow(");
                ui.end_row();

                self.bouton_insert(ui, "sqrt", "√(");
                self.bouton_insert(ui, "abs", "abs(");
                self.bouton_insert(ui, "x!", "!");
                self.bouton_insert(ui, "x^y", "^");
                self.bouton_insert(ui, "rand", "rand()");
                ui.end_row();

                self.bouton_insert(ui, "π", "π");
                self.bouton_insert(ui, "e", "e");
                self.bouton_insert(ui, "Ans", "Ans");
                self.bouton_insert(ui, ",", ",");
                self.bouton_insert(ui, "%", "%");
                ui.end_row();
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7");
                self.bouton_insert(ui, "8", "8");
                self.bouton_insert(ui, "9", "9");
                self.bouton_insert(ui, "(", "(");
                self.bouton_insert(ui, ")", ")");
                ui.end_row();

                self.bouton_insert(ui, "4", "4");
                self.bouton_insert(ui, "5", "5");
                self.bouton_insert(ui, "6", "6");
                self.bouton_insert(ui, "*", "*");
                self.bouton_insert(ui, "/", "/");
                ui.end_row();

                self.bouton_insert(ui, "1", "1");
                self.bouton_insert(ui, "2", "2");
                self.bouton_insert(ui, "3", "3");
                self.bouton_insert(ui, "+", "+");
                self.bouton_insert(ui, "-", "-");
                ui.end_row();

                self.bouton_insert(ui, "0", "0");
                self.bouton_insert(ui, ".", ".");
                self.bouton_action(ui, "DEL", "Efface le dernier caractère", Action::Backspace);
                self.bouton_action(ui, "=", "Évalue", Action::Egal);
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut choisie: Option<EntreeHistorique> = None;
        let mut vider = false;

        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                if self.session.taille_historique() == 0 {
                    ui.weak("vide");
                } else {
                    egui::Frame::group(ui.style())
                        .fill(ui.visuals().extreme_bg_color)
                        .show(ui, |ui| {
                            egui::ScrollArea::vertical()
                                .id_salt("historique_scroll")
                                .max_height(HAUTEUR_HISTORIQUE)
                                .show(ui, |ui| {
                                    ui.set_min_width(ui.available_width());
                                    // le plus récent en haut
                                    for e in self.session.historique().rev() {
                                        let texte = format!("{}\n= {}", e.expression, e.resultat);
                                        let resp = ui.add(
                                            egui::Button::new(egui::RichText::new(texte).monospace())
                                                .frame(false),
                                        );
                                        if resp.clicked() {
                                            choisie = Some(e.clone());
                                        }
                                    }
                                });
                        });
                }

                ui.add_space(4.0);
                vider = ui.button("Vider l’historique").clicked();
            });

        if let Some(e) = choisie {
            self.rappeler_historique(&e);
        }
        if vider {
            self.vider_historique();
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([52.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::Egal => self.egal(),
                Action::ClearEntree => self.clear_entree(),
                Action::ToutEffacer => self.tout_effacer(),
                Action::Backspace => self.backspace(),
                Action::MemoireEffacer => self.memoire_effacer(),
                Action::MemoireRappel => self.memoire_rappel(),
                Action::MemoirePlus => self.memoire_plus(),
                Action::MemoireMoins => self.memoire_moins(),
            }
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str) {
        let resp = ui.add_sized([52.0, 30.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer(to_insert);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Egal,
    ClearEntree,
    ToutEffacer,
    Backspace,
    MemoireEffacer,
    MemoireRappel,
    MemoirePlus,
    MemoireMoins,
}
