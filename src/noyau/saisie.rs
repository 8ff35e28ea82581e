//! Machine à états de saisie (session de calculatrice).
//!
//! Entrée : une `Touche` logique + l’instant courant (depuis le début de session).
//! Sortie : deux tampons texte (`expression`, `affichage`), l’historique, l’erreur.
//!
//! Contrats :
//! - Une touche refusée (plafond dépassé, contenu interdit) ne modifie rien.
//! - "=" est différé (≈50 ms) ; pendant ce délai seules C / CE sont acceptées.
//! - Au plus une évaluation et un effacement d’erreur en attente (chacun son créneau).
//! - Un échec n’abîme jamais les tampons : seul un message transitoire apparaît.
//! - Les minuteries appartiennent à la session : la détruire les annule.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::assainir::{assainir_pour_stockage, normaliser_espaces, LONGUEUR_STOCKAGE};
use super::erreurs::ErreurCalcul;
use super::eval::{evaluer, ENTREE_INVALIDE};
use super::format::format_nombre;
use super::minuterie::Minuterie;
use super::touches::{Operateur, Touche};
use super::validation::{
    contient_balisage, contient_interdit, est_affichage_valide, est_saisie_valide, fin_operateur,
    MAX_AFFICHAGE,
};

/// Longueurs maximales conservées dans l’historique.
pub const HISTORIQUE_MAX_EXPRESSION: usize = 30;
pub const HISTORIQUE_MAX_RESULTAT: usize = 20;

/* ------------------------ Paramètres ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parametres {
    /// Délai entre "=" et le résultat.
    pub delai_calcul: Duration,
    /// Durée de vie d’un message d’erreur.
    pub duree_erreur: Duration,
    pub capacite_historique: usize,
}

impl Default for Parametres {
    fn default() -> Self {
        Self {
            delai_calcul: Duration::from_millis(50),
            duree_erreur: Duration::from_secs(3),
            capacite_historique: 20,
        }
    }
}

/* ------------------------ Historique ------------------------ */

/// Calcul réussi (immuable une fois créé).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementHistorique {
    pub expression: String,
    pub resultat: String,
}

/// Liste bornée, le plus récent en tête, le plus ancien évincé.
#[derive(Clone, Debug)]
pub struct Historique {
    elements: VecDeque<ElementHistorique>,
    capacite: usize,
}

impl Historique {
    pub fn new(capacite: usize) -> Self {
        Self {
            elements: VecDeque::with_capacity(capacite),
            capacite: capacite.max(1),
        }
    }

    pub fn ajouter(&mut self, element: ElementHistorique) {
        self.elements.push_front(element);
        self.elements.truncate(self.capacite);
    }

    pub fn vider(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementHistorique> {
        self.elements.iter()
    }
}

/* ------------------------ Session ------------------------ */

#[derive(Clone, Debug)]
pub struct Session {
    // --- tampons ---
    expression: String,
    affichage: String,

    // --- drapeaux (dérivés de la séquence de touches) ---
    derniere_touche: Option<Touche>,
    vient_de_calculer: bool,
    attend_operande: bool,

    // --- sorties ---
    erreur: Option<String>,
    historique: Historique,

    // --- tâches différées ---
    calcul: Minuterie,
    effacement_erreur: Minuterie,

    parametres: Parametres,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Parametres::default())
    }
}

impl Session {
    pub fn new(parametres: Parametres) -> Self {
        Self {
            expression: String::new(),
            affichage: String::new(),
            derniere_touche: None,
            vient_de_calculer: false,
            attend_operande: false,
            erreur: None,
            historique: Historique::new(parametres.capacite_historique),
            calcul: Minuterie::new(),
            effacement_erreur: Minuterie::new(),
            parametres,
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn affichage(&self) -> &str {
        &self.affichage
    }

    pub fn erreur(&self) -> Option<&str> {
        self.erreur.as_deref()
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    pub fn derniere_touche(&self) -> Option<Touche> {
        self.derniere_touche
    }

    pub fn vient_de_calculer(&self) -> bool {
        self.vient_de_calculer
    }

    pub fn attend_operande(&self) -> bool {
        self.attend_operande
    }

    /// Un "=" attend son échéance.
    pub fn calcul_en_cours(&self) -> bool {
        self.calcul.est_planifiee()
    }

    /// Prochaine échéance (calcul ou effacement d’erreur), pour planifier un rafraîchissement.
    pub fn prochaine_echeance(&self) -> Option<Duration> {
        match (self.calcul.echeance(), self.effacement_erreur.echeance()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /* ------------------------ Entrées ------------------------ */

    /// Point d’entrée unique : une touche logique à l’instant `maintenant`.
    pub fn appuyer(&mut self, touche: Touche, maintenant: Duration) {
        if self.calcul_en_cours() && !touche.est_effacement() {
            debug!(%touche, "touche ignorée : calcul en cours");
            return;
        }

        // Toute nouvelle action efface l’erreur visible.
        self.effacer_erreur();

        match touche {
            Touche::Chiffre(d) => self.chiffre(d),
            Touche::Point => self.point(),
            Touche::Operateur(op) => self.operateur(op),
            Touche::Pourcent => self.pourcent(),
            Touche::Retour => self.retour(),
            Touche::EffacerEntree => self.effacer_entree(),
            Touche::EffacerTout => self.effacer_tout(),
            Touche::Egal => self.egal(maintenant),
        }
    }

    /// Fait avancer le temps : exécute les tâches différées échues.
    pub fn avancer(&mut self, maintenant: Duration) {
        if self.calcul.echue(maintenant) {
            if let Err(e) = self.terminer_calcul() {
                self.signaler(&e, maintenant);
            }
        }
        if self.effacement_erreur.echue(maintenant) {
            self.erreur = None;
        }
    }

    /// Vide l’historique (action explicite de l’utilisateur).
    pub fn vider_historique(&mut self) {
        self.historique.vider();
    }

    /// Fin de session : plus aucune tâche différée ne s’exécutera.
    pub fn fermer(&mut self) {
        self.calcul.annuler();
        self.effacement_erreur.annuler();
        debug!("session fermée");
    }

    /* ------------------------ Transitions ------------------------ */

    fn chiffre(&mut self, d: u8) {
        let Some(c) = char::from_digit(u32::from(d), 10) else {
            return;
        };
        // affichage plein : aucun chiffre, même pour un nouvel opérande
        if self.affichage.chars().count() >= MAX_AFFICHAGE {
            debug!(affichage = %self.affichage, "chiffre refusé : affichage plein");
            return;
        }

        let nouveau_nombre = self.derniere_touche == Some(Touche::Egal)
            || self.affichage == "0"
            || self.vient_de_calculer
            || self.attend_operande;

        let (affichage, expression) = if nouveau_nombre {
            let expression = if self.attend_operande {
                format!("{}{c}", self.expression)
            } else if self.vient_de_calculer || self.derniere_touche == Some(Touche::Egal) {
                c.to_string()
            } else {
                // affichage "0" : le chiffre remplace le zéro de tête
                let base = self
                    .expression
                    .strip_suffix('0')
                    .unwrap_or(&self.expression);
                format!("{base}{c}")
            };
            (c.to_string(), expression)
        } else {
            (
                format!("{}{c}", self.affichage),
                format!("{}{c}", self.expression),
            )
        };

        if !self.accepter(&affichage, &expression) {
            return;
        }
        if nouveau_nombre {
            self.vient_de_calculer = false;
            self.attend_operande = false;
        }
        self.affichage = affichage;
        self.expression = expression;
        self.derniere_touche = Some(Touche::Chiffre(d));
    }

    fn point(&mut self) {
        let nouveau = self.vient_de_calculer || self.attend_operande;
        if !nouveau && self.affichage.contains('.') {
            debug!("point refusé : déjà présent");
            return;
        }

        let (affichage, expression) = if nouveau {
            let colle = self.expression.is_empty()
                || self.derniere_touche == Some(Touche::Egal)
                || self.expression.ends_with(char::is_whitespace);
            let ajout = if colle { "0." } else { " 0." };
            ("0.".to_string(), format!("{}{ajout}", self.expression))
        } else {
            (
                format!("{}.", self.affichage),
                format!("{}.", self.expression),
            )
        };

        if !self.accepter(&affichage, &expression) {
            return;
        }
        if nouveau {
            self.vient_de_calculer = false;
            self.attend_operande = false;
        }
        self.affichage = affichage;
        self.expression = expression;
        self.derniere_touche = Some(Touche::Point);
    }

    fn operateur(&mut self, op: Operateur) {
        let g = op.glyphe();

        let expression = if fin_operateur(&self.expression) {
            // écrasement : "5 + " puis "-" => "5 - "
            let mut base = self.expression.trim_end().to_string();
            base.pop();
            format!("{} {g} ", base.trim_end())
        } else if self.expression.is_empty() {
            format!("{} {g} ", self.affichage)
        } else {
            format!("{} {g} ", self.expression)
        };

        if !self.accepter(&self.affichage, &expression) {
            return;
        }
        self.expression = expression;
        self.vient_de_calculer = false;
        self.attend_operande = true;
        self.derniere_touche = Some(Touche::Operateur(op));
    }

    fn pourcent(&mut self) {
        let besoin_valeur = self.expression.is_empty() || fin_operateur(&self.expression);

        let expression = if besoin_valeur {
            let valeur = if self.affichage.is_empty() {
                "0"
            } else {
                self.affichage.as_str()
            };
            format!("{}{valeur}%", self.expression)
        } else {
            format!("{}%", self.expression)
        };

        if !self.accepter(&self.affichage, &expression) {
            return;
        }
        self.expression = expression;
        self.vient_de_calculer = false;
        self.attend_operande = false;
        self.derniere_touche = Some(Touche::Pourcent);
    }

    fn retour(&mut self) {
        if self.affichage.is_empty() {
            return;
        }

        let mut affichage = self.affichage.clone();
        affichage.pop();

        let expression = if self.attend_operande {
            // opérande pas encore commencé : seul un nombre final disparaît, l’opérateur reste
            let t = self.expression.trim_end();
            if finit_par_nombre(t) {
                retirer_nombre_final(t).to_string()
            } else {
                self.expression.clone()
            }
        } else {
            let mut e = self.expression.clone();
            e.pop();
            e
        };

        if !self.accepter(&affichage, &expression) {
            return;
        }
        self.affichage = affichage;
        self.expression = expression;
        self.derniere_touche = Some(Touche::Retour);
        self.vient_de_calculer = false;
        self.attend_operande = false;
    }

    fn effacer_entree(&mut self) {
        self.calcul.annuler();
        self.affichage.clear();
        self.expression = retirer_nombre_final(&self.expression).to_string();
        self.vient_de_calculer = false;
        self.attend_operande = false;
    }

    fn effacer_tout(&mut self) {
        self.calcul.annuler();
        self.effacer_erreur();
        self.expression.clear();
        self.affichage.clear();
        self.derniere_touche = None;
        self.vient_de_calculer = false;
        self.attend_operande = false;
    }

    fn egal(&mut self, maintenant: Duration) {
        self.calcul.planifier(maintenant, self.parametres.delai_calcul);
        debug!(expression = %self.expression, "calcul planifié");
    }

    /* ------------------------ Tâches différées ------------------------ */

    fn terminer_calcul(&mut self) -> Result<(), ErreurCalcul> {
        let a_evaluer = if fin_operateur(&self.expression) {
            format!("{}{}", self.expression, self.affichage)
        } else if self.expression.is_empty() {
            self.affichage.clone()
        } else {
            self.expression.clone()
        };

        if a_evaluer.trim().is_empty() {
            debug!("rien à évaluer");
            return Ok(());
        }

        let compacte: String = a_evaluer.chars().filter(|c| !c.is_whitespace()).collect();
        let brut = evaluer(&compacte);
        if brut == ENTREE_INVALIDE {
            return Err(ErreurCalcul::ExpressionInvalide);
        }

        let valeur: f64 = brut
            .parse()
            .map_err(|e| ErreurCalcul::Interne(format!("résultat illisible ({brut}): {e}")))?;
        let resultat = format_nombre(valeur);
        if contient_balisage(&resultat) {
            return Err(ErreurCalcul::ResultatInvalide);
        }

        let element = ElementHistorique {
            expression: assainir_pour_stockage(
                &normaliser_espaces(&a_evaluer),
                HISTORIQUE_MAX_EXPRESSION,
            ),
            resultat: assainir_pour_stockage(&resultat, HISTORIQUE_MAX_RESULTAT),
        };
        info!(expression = %element.expression, resultat = %element.resultat, "calcul terminé");
        self.historique.ajouter(element);

        self.affichage = resultat;
        self.expression.clear();
        self.derniere_touche = Some(Touche::Egal);
        self.vient_de_calculer = true;
        self.attend_operande = false;
        Ok(())
    }

    fn signaler(&mut self, erreur: &ErreurCalcul, maintenant: Duration) {
        let message = assainir_pour_stockage(&erreur.to_string(), LONGUEUR_STOCKAGE);
        warn!(%message, expression = %self.expression, "échec du calcul");
        self.erreur = Some(message);
        self.effacement_erreur
            .planifier(maintenant, self.parametres.duree_erreur);
    }

    fn effacer_erreur(&mut self) {
        self.erreur = None;
        self.effacement_erreur.annuler();
    }

    /// Refuse tout ce qui ferait grossir un tampon au-delà de son plafond
    /// (ou y introduirait un contenu interdit).
    fn accepter(&self, affichage: &str, expression: &str) -> bool {
        let ok = accepte_croissance(&self.affichage, affichage, est_affichage_valide)
            && accepte_croissance(&self.expression, expression, est_saisie_valide);
        if !ok {
            debug!(affichage, expression, "saisie refusée");
        }
        ok
    }
}

/// Valide, ou au moins pas plus long que l’ancien (un résultat long reste éditable).
fn accepte_croissance(ancien: &str, nouveau: &str, valide: fn(&str) -> bool) -> bool {
    valide(nouveau)
        || (!contient_interdit(nouveau) && nouveau.chars().count() <= ancien.chars().count())
}

fn finit_par_nombre(s: &str) -> bool {
    s.ends_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// Retire le nombre final (suite de chiffres / points) : "5 + 12" -> "5 + ".
fn retirer_nombre_final(s: &str) -> &str {
    s.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.')
}
