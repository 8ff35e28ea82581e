//! Erreurs du noyau.
//!
//! - `ErreurEval`   : détail interne de l’évaluateur (jamais montré tel quel :
//!                    `evaluer` le réduit à la sentinelle "invalid input").
//! - `ErreurCalcul` : ce que la session affiche à l’utilisateur après "=".

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("expression vide")]
    Vide,

    #[error("expression refusée par la validation")]
    Refusee,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0:?}")]
    NombreInvalide(String),

    #[error("expression mal formée")]
    MalFormee,

    #[error("parenthèses non équilibrées")]
    Parentheses,

    #[error("division par zéro")]
    DivisionParZero,

    #[error("résultat non fini")]
    NonFini,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("Invalid expression")]
    ExpressionInvalide,

    #[error("Invalid result")]
    ResultatInvalide,

    #[error("{0}")]
    Interne(String),
}
