// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur exacte
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), précédence standard :
//   * et / lient plus fort que + et -, tout est associatif à gauche
// - Puis réduire la RPN en un BigRational (aucun flottant)
//
// Moins unaire:
// - si '-' arrive quand on n’attend PAS une valeur, on injecte 0 : "-5+3" => "0 5 - 3 +"
//   (la validation n’autorise ce cas qu’en tête d’expression)

use num_rational::BigRational;
use num_traits::Zero;

use super::erreurs::ErreurEval;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        _ => 0,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(200), Plus, LPar, Num(10), Slash, Num(100), RPar]
///   rpn:    [Num(200), Num(10), Num(100), Slash, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un nombre ou une parenthèse fermée. Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    // deux nombres collés : "5. .2"
                    return Err(ErreurEval::MalFormee);
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                let mut ferme = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ferme = true;
                        break;
                    }
                    out.push(top);
                }
                if !ferme {
                    return Err(ErreurEval::Parentheses);
                }
                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                if matches!(tok, Tok::Minus) && !prev_was_value {
                    out.push(Tok::Num(BigRational::zero()));
                }

                // associatif à gauche : on dépile tant que le sommet lie au moins aussi fort
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || precedence(top) < precedence(&tok) {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }
        }
    }

    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurEval::Parentheses);
        }
        out.push(op);
    }

    Ok(out)
}

/// Réduit une RPN en valeur exacte.
pub fn eval_rpn(rpn: &[Tok]) -> Result<BigRational, ErreurEval> {
    let mut st: Vec<BigRational> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(r) => st.push(r.clone()),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let b = st.pop().ok_or(ErreurEval::MalFormee)?;
                let a = st.pop().ok_or(ErreurEval::MalFormee)?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    _ => {
                        if b.is_zero() {
                            return Err(ErreurEval::DivisionParZero);
                        }
                        a / b
                    }
                };
                st.push(v);
            }

            Tok::LPar | Tok::RPar => return Err(ErreurEval::Parentheses),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurEval::MalFormee),
    }
}
