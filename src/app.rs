// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Horloge: `ctx.input(|i| i.time)` (secondes depuis le démarrage), convertie en Duration.
// Les tâches différées du noyau avancent à chaque frame ; on redemande une frame
// pile à la prochaine échéance, sinon egui dormirait jusqu’au prochain événement.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use std::time::Duration;

use eframe::egui;

use crate::noyau::Touche;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let maintenant = Duration::from_secs_f64(ctx.input(|i| i.time).max(0.0));

        self.avancer(maintenant);

        for touche in touches_clavier(ctx) {
            self.appuyer(touche, maintenant);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui, maintenant);
        });

        if let Some(echeance) = self.prochaine_echeance() {
            ctx.request_repaint_after(echeance.saturating_sub(maintenant));
        }
    }
}

/// Événements clavier de la frame -> touches logiques.
///
/// Texte tapé ("7", "+", "x", "c"...) via `Event::Text` ; touches sans texte
/// (Enter, Backspace, Escape, Delete) via `Event::Key`. Le reste est ignoré.
fn touches_clavier(ctx: &egui::Context) -> Vec<Touche> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|ev| match ev {
                egui::Event::Text(t) => Touche::depuis_nom(t),
                egui::Event::Key {
                    key, pressed: true, ..
                } => nom_touche(*key).and_then(Touche::depuis_nom),
                _ => None,
            })
            .collect()
    })
}

fn nom_touche(key: egui::Key) -> Option<&'static str> {
    match key {
        egui::Key::Enter => Some("Enter"),
        egui::Key::Backspace => Some("Backspace"),
        egui::Key::Escape => Some("Escape"),
        egui::Key::Delete => Some("Delete"),
        _ => None,
    }
}
