// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran : expression (petit), valeur affichée (grand), erreur transitoire
// - Pavé 5×4 (GRILLE du noyau), couleurs par classe de bouton
// - Historique repliable + bouton "vider"
//
// Note :
// - Le clavier physique est traité dans app.rs (événements globaux), pas ici.
// - La vue ne touche jamais aux tampons : tout passe par AppCalc::appuyer.

use std::time::Duration;

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::touches::ClasseBouton;
use crate::noyau::{Touche, GRILLE};

const TAILLE_BOUTON: [f32; 2] = [64.0, 48.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui, maintenant: Duration) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice");
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);

                self.ui_pave(ui, maintenant);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        let s = &self.session;

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // hauteur fixe même quand l’expression est vide
                    let expr = if s.expression().is_empty() {
                        " "
                    } else {
                        s.expression()
                    };
                    ui.label(egui::RichText::new(expr).monospace().weak());
                    if s.calcul_en_cours() {
                        ui.spinner();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let valeur = if s.affichage().is_empty() {
                        "0"
                    } else {
                        s.affichage()
                    };
                    ui.label(egui::RichText::new(valeur).monospace().size(32.0).strong());
                });
            });

        if let Some(msg) = self.session.erreur() {
            ui.add_space(4.0);
            ui.colored_label(ui.visuals().error_fg_color, msg);
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui, maintenant: Duration) {
        let mut appui: Option<Touche> = None;

        egui::Grid::new("pave_touches")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in GRILLE {
                    for touche in ligne {
                        if self.bouton(ui, touche) {
                            appui = Some(touche);
                        }
                    }
                    ui.end_row();
                }
            });

        if let Some(t) = appui {
            self.appuyer(t, maintenant);
        }
    }

    /// Un bouton du pavé ; `true` si cliqué.
    fn bouton(&self, ui: &mut egui::Ui, touche: Touche) -> bool {
        let mut texte = egui::RichText::new(touche.libelle()).size(20.0);
        let fond = couleur(touche.classe());
        if fond.is_some() {
            texte = texte.color(egui::Color32::WHITE);
        }

        let mut b = egui::Button::new(texte).selected(self.touche_active() == Some(touche));
        if let Some(c) = fond {
            b = b.fill(c);
        }

        let mut resp = ui.add_sized(TAILLE_BOUTON, b);
        if let Some(nom) = touche.nom_accessible() {
            resp = resp.on_hover_text(nom);
        }
        resp.clicked()
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut vider = false;

        egui::CollapsingHeader::new("Historique")
            .default_open(true)
            .show(ui, |ui| {
                let h = self.session.historique();
                if h.is_empty() {
                    ui.weak("Aucun calcul pour l’instant");
                    return;
                }

                egui::ScrollArea::vertical()
                    .id_salt("historique_scroll")
                    .max_height(220.0)
                    .show(ui, |ui| {
                        for e in h.iter() {
                            ui.monospace(format!("{} = {}", e.expression, e.resultat));
                        }
                    });

                ui.add_space(6.0);
                vider = ui
                    .button("Effacer l’historique")
                    .on_hover_text("Clear history")
                    .clicked();
            });

        if vider {
            self.vider_historique();
        }
    }
}

/// Fond par classe (`None` = fond par défaut du thème).
fn couleur(classe: ClasseBouton) -> Option<egui::Color32> {
    use egui::Color32;

    match classe {
        ClasseBouton::Chiffre => None,
        ClasseBouton::Operateur => Some(Color32::from_rgb(58, 104, 168)),
        ClasseBouton::Effacement => Some(Color32::from_rgb(176, 64, 64)),
        ClasseBouton::Egal => Some(Color32::from_rgb(52, 140, 84)),
        ClasseBouton::Pourcent => Some(Color32::from_rgb(112, 86, 164)),
        ClasseBouton::Retour => Some(Color32::from_rgb(156, 112, 52)),
    }
}
