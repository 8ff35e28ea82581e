// src/noyau/assainir.rs
//
// Assainissement du texte (fonctions pures, totales).
// - stockage : retire '<' et '>' puis tronque (affichage / historique)
// - jeu de caractères : garde seulement ce qu’une expression peut contenir

/// Longueur par défaut pour un texte destiné à l’affichage.
pub const LONGUEUR_STOCKAGE: usize = 50;

/// Retire les chevrons puis tronque à `max` caractères (pas octets).
pub fn assainir_pour_stockage(texte: &str, max: usize) -> String {
    texte
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(max)
        .collect()
}

/// Caractère admis dans une expression (avant validation structurelle).
pub fn est_caractere_expression(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | 'x' | '/' | '*' | '%' | '.') || c.is_whitespace()
}

/// Retire tout caractère hors {chiffres, + - x / * %, espaces, .}.
pub fn assainir_jeu_caracteres(texte: &str) -> String {
    texte.chars().filter(|c| est_caractere_expression(*c)).collect()
}

/// Espaces multiples -> un seul, puis trim (forme “historique”).
pub fn normaliser_espaces(texte: &str) -> String {
    texte.split_whitespace().collect::<Vec<_>>().join(" ")
}
