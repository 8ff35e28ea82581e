// src/noyau/format.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Nombre de décimales conservées à l’affichage.
pub const DECIMALES: usize = 8;

/// Au-delà : affiché "∞" (signe perdu, comportement historique conservé).
const SEUIL_DEPASSEMENT: f64 = 1e15;

/// En deçà (hors zéro) : affiché "0".
const SEUIL_SOUS_DEPASSEMENT: f64 = 1e-15;

/* ------------------------ Flottant -> affichage ------------------------ */

/// Formate un résultat pour l’écran (fonction totale).
/// - non fini  -> "∞" / "-∞" (NaN suit la branche négative)
/// - |n| > 1e15 -> "∞"
/// - 0 < |n| < 1e-15 -> "0"
/// - sinon arrondi à 8 décimales, zéros inutiles retirés
pub fn format_nombre(n: f64) -> String {
    if !n.is_finite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    if n.abs() > SEUIL_DEPASSEMENT {
        return "∞".to_string();
    }
    if n != 0.0 && n.abs() < SEUIL_SOUS_DEPASSEMENT {
        return "0".to_string();
    }

    let s = format!("{:.*}", DECIMALES, n);
    let s = retirer_zeros(&s);
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// "1.50000000" -> "1.5" ; "2.00000000" -> "2" ; "10" -> "10"
fn retirer_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/* ------------------------ Rationnel exact -> texte ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal, zéros finaux retirés.
fn scaled_to_decimal(scaled: &BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    let abs = scaled.abs();

    let scale = pow10(digits);
    let int_part = &abs / &scale;
    let frac_part = &abs % &scale;

    let mut out = if neg && !abs.is_zero() {
        format!("-{int_part}")
    } else {
        format!("{int_part}")
    };

    if !frac_part.is_zero() {
        let frac = format!("{:0>width$}", frac_part.to_str_radix(10), width = digits);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

/// Résultat exact -> texte canonique :
/// - entier : écriture entière la plus courte
/// - sinon : arrondi à 8 décimales (demi-unité loin de zéro), zéros finaux retirés
pub fn format_rationnel_arrondi(r: &BigRational) -> String {
    if r.denom().is_one() {
        return r.numer().to_string();
    }
    let scale = BigRational::from_integer(pow10(DECIMALES));
    let scaled = (r * scale).round().to_integer();
    scaled_to_decimal(&scaled, DECIMALES)
}
