//! Validation structurelle des expressions (prédicats explicites, sans regex).
//!
//! Deux plafonds coexistent :
//! - saisie (touche par touche) : expression ≤ 50, affichage ≤ 15
//! - évaluation (au moment de "=") : expression ≤ 100
//!
//! Un `-` en tête est toléré (premier opérande négatif, ex: résultat réutilisé).

use super::assainir::est_caractere_expression;

/// Plafond de l’expression au moment de l’évaluation.
pub const MAX_EXPRESSION_EVAL: usize = 100;

/// Plafond de l’expression pendant la saisie.
pub const MAX_EXPRESSION_SAISIE: usize = 50;

/// Plafond de la valeur affichée (opérande courant).
pub const MAX_AFFICHAGE: usize = 15;

/// Sous-chaînes refusées (comparaison insensible à la casse).
const MOTS_INTERDITS: &[&str] = &[
    "eval",
    "function",
    "constructor",
    "import",
    "require",
    "process",
    "window",
    "document",
];

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | 'x' | '/' | '*')
}

/// Chevron ou "script" : texte qu’on refuse d’afficher.
pub fn contient_balisage(texte: &str) -> bool {
    texte.contains(['<', '>']) || texte.to_lowercase().contains("script")
}

/// Contient un mot de la liste noire, un chevron ou "script".
pub fn contient_interdit(expr: &str) -> bool {
    let bas = expr.to_lowercase();
    contient_balisage(&bas) || MOTS_INTERDITS.iter().any(|m| bas.contains(m))
}

/// L’expression se termine (espaces ignorés) par un opérateur binaire de saisie.
pub fn fin_operateur(expr: &str) -> bool {
    matches!(expr.trim_end().chars().last(), Some('+' | '-' | 'x' | '/'))
}

/// Contrat d’évaluation : `true` si l’expression peut être confiée à l’évaluateur.
pub fn est_structurellement_valide(expr: &str) -> bool {
    let s = expr.trim();
    if s.is_empty() || expr.chars().count() > MAX_EXPRESSION_EVAL {
        return false;
    }
    if !s.chars().all(est_caractere_expression) {
        return false;
    }
    if contient_interdit(s) {
        return false;
    }

    // On raisonne sur les caractères significatifs (espaces retirés) :
    // "5 + + 3" est un double opérateur au même titre que "5++3".
    let compact: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();

    if compact
        .windows(2)
        .any(|w| est_operateur(w[0]) && est_operateur(w[1]))
    {
        return false;
    }

    match compact.first() {
        Some('+' | 'x' | '/' | '*') | None => return false,
        _ => {}
    }
    if compact.last().copied().is_some_and(est_operateur) {
        return false;
    }

    // ".." ou "%%" : on regarde la chaîne telle quelle (pas la forme compacte)
    !s.contains("..") && !s.contains("%%")
}

/// Contrat de saisie pour l’expression (vide autorisé : état initial).
pub fn est_saisie_valide(expr: &str) -> bool {
    expr.chars().count() <= MAX_EXPRESSION_SAISIE && !contient_interdit(expr)
}

/// Contrat de saisie pour la valeur affichée.
pub fn est_affichage_valide(affichage: &str) -> bool {
    affichage.chars().count() <= MAX_AFFICHAGE && !contient_interdit(affichage)
}
