//! Vocabulaire des touches logiques.
//!
//! Deux surfaces (clic sur le pavé, clavier physique) convergent vers `Touche`.
//! Une touche inconnue donne `None` : elle est ignorée, ce n’est pas une erreur.

use std::fmt;

/// Opérateur binaire tel qu’affiché dans l’expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operateur {
    /// Glyphe d’affichage (multiplication = `x`).
    pub fn glyphe(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => 'x',
            Operateur::Divise => '/',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    /// 0..=9
    Chiffre(u8),
    Point,
    Operateur(Operateur),
    Pourcent,
    Egal,
    /// ⌫
    Retour,
    /// CE
    EffacerEntree,
    /// C
    EffacerTout,
}

/// Classe visuelle d’un bouton du pavé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClasseBouton {
    Chiffre,
    Operateur,
    Effacement,
    Egal,
    Pourcent,
    Retour,
}

/// Pavé 5×4, ordre ligne par ligne.
pub const GRILLE: [[Touche; 4]; 5] = [
    [
        Touche::Pourcent,
        Touche::EffacerEntree,
        Touche::EffacerTout,
        Touche::Retour,
    ],
    [
        Touche::Chiffre(7),
        Touche::Chiffre(8),
        Touche::Chiffre(9),
        Touche::Operateur(Operateur::Divise),
    ],
    [
        Touche::Chiffre(4),
        Touche::Chiffre(5),
        Touche::Chiffre(6),
        Touche::Operateur(Operateur::Fois),
    ],
    [
        Touche::Chiffre(1),
        Touche::Chiffre(2),
        Touche::Chiffre(3),
        Touche::Operateur(Operateur::Plus),
    ],
    [
        Touche::Point,
        Touche::Chiffre(0),
        Touche::Egal,
        Touche::Operateur(Operateur::Moins),
    ],
];

impl Touche {
    /// Nom de touche physique (ou libellé de bouton) -> touche logique.
    ///
    /// - chiffres -> eux-mêmes ; `*` et `x` -> multiplication
    /// - `Enter` / `=` -> égal ; `Backspace` / `⌫` -> retour
    /// - `Escape` / `c` / `C` / `Delete` -> tout effacer ; `CE` -> effacer l’entrée
    /// - espaces, modificateurs, inconnues -> `None`
    pub fn depuis_nom(nom: &str) -> Option<Touche> {
        use Operateur::*;

        let t = match nom {
            "+" => Touche::Operateur(Plus),
            "-" => Touche::Operateur(Moins),
            "*" | "x" => Touche::Operateur(Fois),
            "/" => Touche::Operateur(Divise),
            "%" => Touche::Pourcent,
            "." => Touche::Point,
            "Enter" | "=" => Touche::Egal,
            "Backspace" | "⌫" => Touche::Retour,
            "Escape" | "c" | "C" | "Delete" => Touche::EffacerTout,
            "CE" => Touche::EffacerEntree,
            _ => {
                let mut it = nom.chars();
                match (it.next(), it.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Touche::Chiffre(c as u8 - b'0'),
                    _ => return None,
                }
            }
        };
        Some(t)
    }

    /// Libellé du bouton (et forme textuelle de la touche).
    pub fn libelle(self) -> String {
        match self {
            Touche::Chiffre(d) => d.to_string(),
            Touche::Point => ".".to_string(),
            Touche::Operateur(op) => op.glyphe().to_string(),
            Touche::Pourcent => "%".to_string(),
            Touche::Egal => "=".to_string(),
            Touche::Retour => "⌫".to_string(),
            Touche::EffacerEntree => "CE".to_string(),
            Touche::EffacerTout => "C".to_string(),
        }
    }

    /// Nom accessible (infobulle) pour les touches dont le libellé est cryptique.
    pub fn nom_accessible(self) -> Option<&'static str> {
        match self {
            Touche::EffacerEntree => Some("Clear Entry"),
            Touche::EffacerTout => Some("Clear All"),
            Touche::Retour => Some("Backspace"),
            _ => None,
        }
    }

    pub fn classe(self) -> ClasseBouton {
        match self {
            Touche::Chiffre(_) | Touche::Point => ClasseBouton::Chiffre,
            Touche::Operateur(_) => ClasseBouton::Operateur,
            Touche::EffacerEntree | Touche::EffacerTout => ClasseBouton::Effacement,
            Touche::Egal => ClasseBouton::Egal,
            Touche::Pourcent => ClasseBouton::Pourcent,
            Touche::Retour => ClasseBouton::Retour,
        }
    }

    /// Touche d’effacement : seule acceptée pendant un calcul.
    pub fn est_effacement(self) -> bool {
        matches!(self, Touche::EffacerEntree | Touche::EffacerTout)
    }
}

impl fmt::Display for Touche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.libelle())
    }
}
