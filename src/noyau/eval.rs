//! Noyau — évaluation (pipeline réel)
//!
//! assainir jeu de caractères -> validation -> réécriture (x -> *, espaces, n% -> (n/100))
//!        -> jetons -> RPN -> valeur exacte -> texte canonique
//!
//! Aucun évaluateur générique : la grammaire acceptée est celle de `jetons` + `rpn`.

use tracing::debug;

use super::assainir::assainir_jeu_caracteres;
use super::erreurs::ErreurEval;
use super::format::format_rationnel_arrondi;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, to_rpn};
use super::validation::est_structurellement_valide;

/// Sentinelle unique renvoyée par `evaluer` pour tout échec.
pub const ENTREE_INVALIDE: &str = "invalid input";

/// API publique : ne panique jamais, renvoie `ENTREE_INVALIDE` en cas d’échec.
pub fn evaluer(expr: &str) -> String {
    match evaluer_detail(expr) {
        Ok(s) => s,
        Err(e) => {
            debug!(expression = expr, erreur = %e, "évaluation refusée");
            ENTREE_INVALIDE.to_string()
        }
    }
}

/// Même pipeline que `evaluer`, mais l’erreur reste typée.
pub fn evaluer_detail(expr: &str) -> Result<String, ErreurEval> {
    // 1) Jeu de caractères + validation structurelle
    let propre = assainir_jeu_caracteres(expr);
    if !est_structurellement_valide(&propre) {
        return Err(ErreurEval::Refusee);
    }

    // 2-3) Réécriture
    let reecrite = reecrire(&propre);

    // 4) Rien à calculer
    if reecrite.is_empty() {
        return Err(ErreurEval::Vide);
    }

    // 5) Jetons -> RPN -> valeur exacte
    let jetons = tokenize(&reecrite)?;
    let rpn = to_rpn(&jetons)?;
    debug!(rpn = %format_tokens(&rpn), "expression réduite");
    let valeur = eval_rpn(&rpn)?;

    // 6-7) Texte canonique ; on refuse ce qui ne tient pas dans un f64 fini
    let texte = format_rationnel_arrondi(&valeur);
    match texte.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(texte),
        _ => Err(ErreurEval::NonFini),
    }
}

/// Réécriture textuelle :
/// - `x` (multiplication affichée) -> `*`
/// - espaces retirés
/// - `<nombre>%` -> `(<nombre>/100)`, où qu’il apparaisse
pub fn reecrire(expr: &str) -> String {
    let compact: String = expr
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == 'x' { '*' } else { c })
        .collect();

    if !compact.contains('%') {
        return compact;
    }

    let mut out = String::with_capacity(compact.len() + 8);
    let mut nombre = String::new();

    for c in compact.chars() {
        if c.is_ascii_digit() || c == '.' {
            nombre.push(c);
            continue;
        }
        if c == '%' && !nombre.is_empty() {
            out.push('(');
            out.push_str(&nombre);
            out.push_str("/100)");
            nombre.clear();
            continue;
        }
        out.push_str(&nombre);
        nombre.clear();
        out.push(c);
    }
    out.push_str(&nombre);

    out
}
