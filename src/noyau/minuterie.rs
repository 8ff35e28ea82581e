//! Tâche différée annulable (un seul créneau).
//!
//! Le temps est fourni par l’appelant (`Duration` depuis le début de session) :
//! pas d’horloge globale, pas de rappel qui survit à son propriétaire.
//! Replanifier remplace (donc annule) l’échéance précédente.

use std::time::Duration;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Minuterie {
    echeance: Option<Duration>,
}

impl Minuterie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Planifie (ou replanifie) la tâche à `maintenant + delai`.
    pub fn planifier(&mut self, maintenant: Duration, delai: Duration) {
        self.echeance = Some(maintenant.saturating_add(delai));
    }

    pub fn annuler(&mut self) {
        self.echeance = None;
    }

    pub fn est_planifiee(&self) -> bool {
        self.echeance.is_some()
    }

    pub fn echeance(&self) -> Option<Duration> {
        self.echeance
    }

    /// `true` une seule fois, quand l’échéance est atteinte (le créneau est alors libéré).
    pub fn echue(&mut self, maintenant: Duration) -> bool {
        match self.echeance {
            Some(t) if maintenant >= t => {
                self.echeance = None;
                true
            }
            _ => false,
        }
    }
}
