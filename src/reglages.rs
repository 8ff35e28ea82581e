// src/reglages.rs
//
// Réglages utilisateur (TOML, tous les champs optionnels).
//
// Fichier (natif) : <config_dir>/calculatrice-touches/reglages.toml
//
//   delai_calcul_ms = 50
//   duree_erreur_ms = 3000
//   capacite_historique = 20
//
// Les valeurs hors bornes sont ramenées dans l’intervalle admis, jamais refusées.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::noyau::Parametres;

#[cfg(not(target_arch = "wasm32"))]
const DOSSIER_APP: &str = "calculatrice-touches";
#[cfg(not(target_arch = "wasm32"))]
const FICHIER: &str = "reglages.toml";

#[derive(Debug, Error)]
pub enum ErreurReglages {
    #[error("lecture de {chemin} impossible: {source}")]
    Lecture {
        chemin: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("réglages invalides: {0}")]
    Syntaxe(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub delai_calcul_ms: u64,
    pub duree_erreur_ms: u64,
    pub capacite_historique: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            delai_calcul_ms: 50,
            duree_erreur_ms: 3000,
            capacite_historique: 20,
        }
    }
}

impl Reglages {
    /// Lit et borne un fichier de réglages.
    pub fn depuis_fichier(chemin: &Path) -> Result<Self, ErreurReglages> {
        let texte = fs::read_to_string(chemin).map_err(|source| ErreurReglages::Lecture {
            chemin: chemin.to_path_buf(),
            source,
        })?;
        Self::depuis_texte(&texte)
    }

    pub fn depuis_texte(texte: &str) -> Result<Self, ErreurReglages> {
        let mut r: Reglages = toml::from_str(texte)?;
        r.borner();
        Ok(r)
    }

    /// Emplacement standard du fichier (natif uniquement).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn chemin() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(DOSSIER_APP).join(FICHIER))
    }

    /// Réglages effectifs : fichier s’il existe et se lit, sinon défauts.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn charger() -> Self {
        let Some(chemin) = Self::chemin() else {
            warn!("dossier de configuration introuvable, réglages par défaut");
            return Self::default();
        };
        if !chemin.exists() {
            return Self::default();
        }
        match Self::depuis_fichier(&chemin) {
            Ok(r) => {
                info!(chemin = %chemin.display(), ?r, "réglages chargés");
                r
            }
            Err(e) => {
                warn!(error = %e, "réglages ignorés, valeurs par défaut");
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn charger() -> Self {
        Self::default()
    }

    fn borner(&mut self) {
        self.delai_calcul_ms = self.delai_calcul_ms.min(1000);
        self.duree_erreur_ms = self.duree_erreur_ms.clamp(500, 30_000);
        self.capacite_historique = self.capacite_historique.clamp(1, 200);
    }
}

impl From<&Reglages> for Parametres {
    fn from(r: &Reglages) -> Self {
        Parametres {
            delai_calcul: Duration::from_millis(r.delai_calcul_ms),
            duree_erreur: Duration::from_millis(r.duree_erreur_ms),
            capacite_historique: r.capacite_historique,
        }
    }
}
