//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : porter la `Session` du noyau et le peu d’état purement visuel
//! (bouton actif). Toute la logique de saisie vit dans le noyau.
//!
//! Contrats :
//! - Aucune évaluation ici, aucune règle de saisie dupliquée.
//! - L’horloge est fournie par l’appelant (instant egui), jamais lue ici.

use std::time::Duration;

use tracing::debug;

use crate::noyau::{Parametres, Session, Touche};
use crate::reglages::Reglages;

/// Durée du surlignage du dernier bouton activé.
const DUREE_SURLIGNAGE: Duration = Duration::from_millis(150);

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub session: Session,

    // --- UX ---
    touche_active: Option<Touche>,
    fin_surlignage: Duration,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Parametres::default())
    }
}

impl AppCalc {
    pub fn new(parametres: Parametres) -> Self {
        Self {
            session: Session::new(parametres),
            touche_active: None,
            fin_surlignage: Duration::ZERO,
        }
    }

    pub fn depuis_reglages(reglages: &Reglages) -> Self {
        Self::new(Parametres::from(reglages))
    }

    /* ------------------------ Actions ------------------------ */

    /// Bouton cliqué ou touche clavier : même chemin.
    pub fn appuyer(&mut self, touche: Touche, maintenant: Duration) {
        self.touche_active = Some(touche);
        self.fin_surlignage = maintenant + DUREE_SURLIGNAGE;
        self.session.appuyer(touche, maintenant);
    }

    /// Avance le temps (tâches différées + fin du surlignage).
    pub fn avancer(&mut self, maintenant: Duration) {
        self.session.avancer(maintenant);
        if self.touche_active.is_some() && maintenant >= self.fin_surlignage {
            self.touche_active = None;
        }
    }

    pub fn vider_historique(&mut self) {
        debug!(elements = self.session.historique().len(), "historique vidé");
        self.session.vider_historique();
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn touche_active(&self) -> Option<Touche> {
        self.touche_active
    }

    /// Prochain instant où l’état changera sans intervention (pour redessiner).
    pub fn prochaine_echeance(&self) -> Option<Duration> {
        let surlignage = self.touche_active.map(|_| self.fin_surlignage);
        match (self.session.prochaine_echeance(), surlignage) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

impl Drop for AppCalc {
    fn drop(&mut self) {
        self.session.fermer();
    }
}
