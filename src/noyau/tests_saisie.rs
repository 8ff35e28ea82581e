//! Scénarios de saisie : séquences de touches complètes, temps simulé.

use std::time::Duration;

use super::format::format_nombre;
use super::saisie::{Parametres, Session};
use super::touches::Touche;
use super::validation::{MAX_AFFICHAGE, MAX_EXPRESSION_SAISIE};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Session + horloge simulée.
struct Banc {
    s: Session,
    t: Duration,
}

impl Banc {
    fn new() -> Self {
        Self {
            s: Session::new(Parametres::default()),
            t: Duration::ZERO,
        }
    }

    /// Une touche, sans laisser passer le temps.
    fn touche(&mut self, nom: &str) {
        let k = Touche::depuis_nom(nom).unwrap_or_else(|| panic!("touche inconnue: {nom:?}"));
        self.s.appuyer(k, self.t);
    }

    fn attendre(&mut self, d: Duration) {
        self.t += d;
        self.s.avancer(self.t);
    }

    /// Touches séparées par des espaces ; 60 ms entre chaque (le "=" a le temps d’aboutir).
    fn taper(&mut self, touches: &str) {
        for nom in touches.split_whitespace() {
            self.touche(nom);
            self.attendre(ms(60));
        }
    }

    fn etat(&self) -> (String, String) {
        (self.s.expression().to_string(), self.s.affichage().to_string())
    }
}

fn calcule(touches: &str) -> String {
    let mut b = Banc::new();
    b.taper(touches);
    assert_eq!(b.s.erreur(), None, "touches={touches:?}");
    b.s.affichage().to_string()
}

/// "12.5" -> "1 2 . 5"
fn espacer(nombre: &str) -> String {
    nombre
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/* ------------------------ Arithmétique via le pavé ------------------------ */

#[test]
fn deux_operandes_comme_l_arithmetique_directe() {
    let cas: &[(&str, char, &str, f64)] = &[
        ("12", '+', "7", 12.0 + 7.0),
        ("9", '-', "20", 9.0 - 20.0),
        ("6", 'x', "7", 6.0 * 7.0),
        ("1", '/', "3", 1.0 / 3.0),
        ("2.5", 'x', "4", 2.5 * 4.0),
        ("10", '/', "4", 10.0 / 4.0),
        ("0.1", '+', "0.2", 0.1 + 0.2),
        ("123456", 'x', "654321", 123456.0 * 654321.0),
    ];

    for (a, op, b, attendu) in cas {
        let touches = format!("{} {op} {} =", espacer(a), espacer(b));
        assert_eq!(calcule(&touches), format_nombre(*attendu), "{touches}");
    }
}

#[test]
fn ecrasement_d_operateur() {
    let mut b = Banc::new();
    b.taper("5 + -");
    assert_eq!(b.s.expression(), "5 - ");
    b.taper("3 =");
    assert_eq!(b.s.affichage(), "2");
    assert_eq!(b.s.historique().iter().next().map(|e| e.expression.as_str()), Some("5 - 3"));
}

#[test]
fn pourcentages() {
    assert_eq!(calcule("5 0 % ="), "0.5");
    assert_eq!(calcule("2 0 0 + 1 0 % ="), "200.1");
}

#[test]
fn pourcent_apres_operateur_reprend_l_affichage() {
    let mut b = Banc::new();
    b.taper("2 0 0 + %");
    assert_eq!(b.s.expression(), "200 + 200%");
    b.taper("=");
    assert_eq!(b.s.affichage(), "202");
}

#[test]
fn precedence_standard_sur_chaine() {
    assert_eq!(calcule("2 + 3 x 4 ="), "14");
}

#[test]
fn reutiliser_le_resultat() {
    let mut b = Banc::new();
    b.taper("2 + 3 =");
    assert_eq!(b.s.affichage(), "5");
    assert!(b.s.vient_de_calculer());
    b.taper("x 4 =");
    assert_eq!(b.s.affichage(), "20");
}

#[test]
fn resultat_negatif_reutilise() {
    let mut b = Banc::new();
    b.taper("3 - 5 =");
    assert_eq!(b.s.affichage(), "-2");
    b.taper("+ 1 =");
    assert_eq!(b.s.affichage(), "-1");
}

#[test]
fn chiffre_apres_resultat_repart_de_zero() {
    let mut b = Banc::new();
    b.taper("2 + 3 = 7");
    assert_eq!(b.etat(), ("7".to_string(), "7".to_string()));
    assert!(!b.s.vient_de_calculer());
}

#[test]
fn zero_de_tete_remplace() {
    let mut b = Banc::new();
    b.taper("0 5");
    assert_eq!(b.etat(), ("5".to_string(), "5".to_string()));

    let mut b = Banc::new();
    b.taper("5 + 0 3");
    assert_eq!(b.s.expression(), "5 + 3");
    b.taper("=");
    assert_eq!(b.s.affichage(), "8");
}

#[test]
fn point_decimal() {
    let mut b = Banc::new();
    b.taper("5 + .");
    assert_eq!(b.etat(), ("5 + 0.".to_string(), "0.".to_string()));
    b.taper("5 =");
    assert_eq!(b.s.affichage(), "5.5");

    // second point refusé
    let mut b = Banc::new();
    b.taper("1 . 2 .");
    assert_eq!(b.etat(), ("1.2".to_string(), "1.2".to_string()));

    // après "=" : nouvel opérande "0."
    let mut b = Banc::new();
    b.taper("1 + 1 = .");
    assert_eq!(b.etat(), ("0.".to_string(), "0.".to_string()));
}

#[test]
fn chiffres_entiers_en_grand() {
    assert_eq!(calcule("1 0 0 0 0 0 0 0 0 x 1 0 0 0 0 0 0 0 0 ="), "∞");
}

/* ------------------------ Effacements ------------------------ */

#[test]
fn c_revient_toujours_a_l_etat_initial() {
    for touches in ["", "1 2 +", "5 / 0 =", "2 + 3 =", "1 . 5 %", "9 x"] {
        let mut b = Banc::new();
        b.taper(touches);
        b.touche("C");
        assert_eq!(b.etat(), (String::new(), String::new()), "{touches:?}");
        assert_eq!(b.s.erreur(), None);
        assert_eq!(b.s.derniere_touche(), None);
        assert!(!b.s.vient_de_calculer());
        assert!(!b.s.attend_operande());
        assert!(!b.s.calcul_en_cours());

        // idempotent
        b.touche("C");
        assert_eq!(b.etat(), (String::new(), String::new()));
    }
}

#[test]
fn c_annule_le_calcul_en_vol() {
    let mut b = Banc::new();
    b.taper("2 + 2");
    b.touche("=");
    assert!(b.s.calcul_en_cours());
    b.touche("C");
    b.attendre(ms(200));
    assert!(b.s.historique().is_empty());
    assert_eq!(b.etat(), (String::new(), String::new()));
}

#[test]
fn ce_retire_le_nombre_final() {
    let mut b = Banc::new();
    b.taper("1 2 + 3 4 CE");
    assert_eq!(b.etat(), ("12 + ".to_string(), String::new()));
    b.taper("5 =");
    assert_eq!(b.s.affichage(), "17");
}

#[test]
fn ce_annule_aussi_le_calcul() {
    let mut b = Banc::new();
    b.taper("7 + 1");
    b.touche("=");
    b.touche("CE");
    assert!(!b.s.calcul_en_cours());
    b.attendre(ms(200));
    assert!(b.s.historique().is_empty());
    assert_eq!(b.s.expression(), "7 + ");
}

#[test]
fn retour_sur_affichage_vide_sans_effet() {
    let mut b = Banc::new();
    b.touche("Backspace");
    assert_eq!(b.etat(), (String::new(), String::new()));
    assert_eq!(b.s.derniere_touche(), None);
}

#[test]
fn retour_apres_operateur_garde_l_operateur() {
    let mut b = Banc::new();
    b.taper("5 + ⌫");
    assert_eq!(b.etat(), ("5 + ".to_string(), String::new()));
    assert!(!b.s.attend_operande());
    b.taper("3 =");
    assert_eq!(b.s.affichage(), "8");
}

#[test]
fn retour_en_cours_de_nombre() {
    let mut b = Banc::new();
    b.taper("1 2 3 ⌫");
    assert_eq!(b.etat(), ("12".to_string(), "12".to_string()));
}

/* ------------------------ Plafonds ------------------------ */

#[test]
fn affichage_plafonne_sans_modification() {
    let mut b = Banc::new();
    for _ in 0..MAX_AFFICHAGE {
        b.taper("9");
    }
    let avant = b.etat();
    assert_eq!(avant.1.len(), MAX_AFFICHAGE);
    b.taper("9");
    assert_eq!(b.etat(), avant);
}

#[test]
fn affichage_plein_bloque_aussi_le_nouvel_operande() {
    let mut b = Banc::new();
    for _ in 0..MAX_AFFICHAGE {
        b.taper("9");
    }
    b.taper("+");
    let avant = b.etat();
    assert_eq!(
        avant,
        ("999999999999999 + ".to_string(), "999999999999999".to_string())
    );

    b.taper("1");
    assert_eq!(b.etat(), avant);

    // l’opérateur reste modifiable, et C libère la saisie
    b.taper("-");
    assert_eq!(b.s.expression(), "999999999999999 - ");
    b.taper("C 1");
    assert_eq!(b.etat(), ("1".to_string(), "1".to_string()));
}

#[test]
fn resultat_long_bloque_les_chiffres() {
    let mut b = Banc::new();
    b.taper("1 2 3 4 5 6 7 / 7 =");
    assert_eq!(b.s.affichage(), "176366.71428571");

    let avant = b.etat();
    b.taper("5");
    assert_eq!(b.etat(), avant);

    b.taper("⌫ 5");
    assert_eq!(b.s.affichage(), "176366.71428575");
}

#[test]
fn expression_plafonnee_sans_modification() {
    let mut b = Banc::new();
    for _ in 0..12 {
        b.taper("1 +");
    }
    b.taper("1");
    assert_eq!(b.s.expression().len(), 49);

    let avant = b.etat();
    b.taper("+");
    assert_eq!(b.etat(), avant);

    b.taper("2");
    assert_eq!(b.s.expression().len(), MAX_EXPRESSION_SAISIE);
    let avant = b.etat();
    b.taper("3");
    assert_eq!(b.etat(), avant);
}

/* ------------------------ "=" différé et erreurs ------------------------ */

#[test]
fn division_par_zero_non_destructive() {
    let mut b = Banc::new();
    b.taper("5 / 0 =");
    assert_eq!(b.s.erreur(), Some("Invalid expression"));
    assert_eq!(b.etat(), ("5 / 0".to_string(), "0".to_string()));
    assert!(b.s.historique().is_empty());
    assert!(!b.s.calcul_en_cours());

    // l’erreur expire seule
    b.attendre(Duration::from_secs(3));
    assert_eq!(b.s.erreur(), None);
}

#[test]
fn touche_suivante_efface_l_erreur() {
    let mut b = Banc::new();
    b.taper("5 / 0 =");
    assert!(b.s.erreur().is_some());
    b.taper("⌫");
    assert_eq!(b.s.erreur(), None);
    assert_eq!(b.s.prochaine_echeance(), None);
}

#[test]
fn calcul_bloque_les_autres_touches() {
    let mut b = Banc::new();
    b.taper("5 + 3");
    b.touche("=");
    b.touche("4");
    b.touche("=");
    assert_eq!(b.s.expression(), "5 + 3");

    b.attendre(ms(49));
    assert!(b.s.calcul_en_cours());
    b.attendre(ms(1));
    assert!(!b.s.calcul_en_cours());
    assert_eq!(b.s.affichage(), "8");
    assert_eq!(b.s.historique().len(), 1);
}

#[test]
fn egal_sur_vide_sans_erreur_ni_historique() {
    let mut b = Banc::new();
    b.taper("=");
    assert_eq!(b.s.erreur(), None);
    assert!(b.s.historique().is_empty());
    assert!(!b.s.calcul_en_cours());
}

#[test]
fn egal_complete_l_operande_manquant() {
    // "5 + " + affichage "5"
    assert_eq!(calcule("5 + ="), "10");
}

/* ------------------------ Historique ------------------------ */

#[test]
fn un_element_par_calcul_reussi_borne_a_vingt() {
    let mut b = Banc::new();
    for i in 1..=25u32 {
        b.taper(&format!("{} + 1 =", espacer(&i.to_string())));
        assert_eq!(b.s.historique().len(), (i as usize).min(20));
    }
    let premier = b.s.historique().iter().next().cloned();
    assert_eq!(premier.map(|e| (e.expression, e.resultat)), Some(("25 + 1".into(), "26".into())));
    let dernier = b.s.historique().iter().last().cloned();
    assert_eq!(dernier.map(|e| e.expression), Some("6 + 1".into()));

    for e in b.s.historique().iter() {
        assert!(!e.expression.contains(['<', '>']));
        assert!(e.expression.chars().count() <= 30);
        assert!(e.resultat.chars().count() <= 20);
    }

    b.s.vider_historique();
    assert!(b.s.historique().is_empty());
}

#[test]
fn echec_n_ajoute_rien() {
    let mut b = Banc::new();
    b.taper("1 + 1 =");
    b.taper("5 / 0 =");
    assert_eq!(b.s.historique().len(), 1);
}

#[test]
fn capacite_configurable() {
    let mut b = Banc::new();
    b.s = Session::new(Parametres {
        capacite_historique: 2,
        ..Parametres::default()
    });
    b.taper("1 = 2 = 3 =");
    assert_eq!(b.s.historique().len(), 2);
}
