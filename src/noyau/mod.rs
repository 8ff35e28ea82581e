//! Noyau de la calculatrice à touches
//!
//! Organisation interne :
//! - assainir.rs   : retrait des caractères dangereux / hors jeu + troncature
//! - validation.rs : prédicats structurels (saisie et évaluation)
//! - jetons.rs     : tokenisation (décimaux exacts)
//! - rpn.rs        : shunting-yard + réduction exacte
//! - eval.rs       : pipeline complet, sentinelle "invalid input"
//! - format.rs     : affichage borné (∞, 8 décimales)
//! - touches.rs    : touches logiques + pavé 5×4
//! - minuterie.rs  : créneau de tâche différée annulable
//! - saisie.rs     : machine à états (session)

pub mod assainir;
pub mod erreurs;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod minuterie;
pub mod rpn;
pub mod saisie;
pub mod touches;
pub mod validation;

#[cfg(test)]
mod tests_saisie;


// API publique minimale
pub use saisie::{Parametres, Session};
pub use touches::{Touche, GRILLE};
