// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::erreurs::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),

    Plus,
    Minus,
    Star,
    Slash,

    // Seulement produites par la réécriture des pourcentages : "(50/100)"
    LPar,
    RPar,
}

/// Tokenize une expression déjà réécrite (x -> *, pourcentages -> (n/100)).
/// Supporte:
/// - décimaux exacts : 12, 12.5, .5, 5. (lus comme rationnels, pas de flottants)
/// - opérateurs + - * /
/// - parenthèses ( )
/// Tout autre caractère est une erreur (les espaces sont ignorés).
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let op = match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            _ => None,
        };
        if let Some(t) = op {
            out.push(t);
            i += 1;
            continue;
        }

        // Littéral décimal : chiffres, au plus un point
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let lit: String = chars[start..i].iter().collect();
            out.push(Tok::Num(parse_decimal(&lit)?));
            continue;
        }

        return Err(ErreurEval::CaractereInattendu(c));
    }

    Ok(out)
}

/// "12.345" -> 12345/1000 (exact).
pub fn parse_decimal(lit: &str) -> Result<BigRational, ErreurEval> {
    let invalide = || ErreurEval::NombreInvalide(lit.to_string());

    let (ent, frac) = match lit.split_once('.') {
        Some((e, f)) => (e, f),
        None => (lit, ""),
    };
    if frac.contains('.') || (ent.is_empty() && frac.is_empty()) {
        return Err(invalide());
    }

    let chiffres = format!("{ent}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(invalide)?;
    let d = BigInt::from(10).pow(frac.len() as u32);

    Ok(BigRational::new(n, d))
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        if r.denom().is_one() {
            format!("{}", r.numer())
        } else {
            format!("{}/{}", r.numer(), r.denom())
        }
    }

    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(r) => format_rat(r),
            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
