//! Minimal boolean-expression engine for LUT truth tables.
//!
//! Expressions are built from input literals `A1`..`A6` (or their negation
//! `~A1`), `*` for AND, and `+` for OR, the same notation the canonical LUT
//! expressions use elsewhere in this codec (e.g. `"A1*A2"`,
//! `"(A6+~A6)*(A1*A2)"`). [`parse_boolexpr`] evaluates an expression over
//! every input combination to build a truth table; [`bits_to_expr`] does the
//! inverse, producing a canonical sum-of-minterms expression for a given
//! truth table.

use crate::error::{CodecError, Result};

/// Evaluates `expr` over all `2^width` input combinations and returns the
/// resulting truth table, bit `i` set when the expression is true for input
/// combination `i` (bit `j` of `i` is the value of `A(j+1)`).
pub fn parse_boolexpr(expr: &str, width: u32) -> Result<u64> {
    let tokens = tokenize(expr)?;
    let mut out = 0u64;
    for combo in 0u64..(1u64 << width) {
        if eval(&tokens, combo)? {
            out |= 1 << combo;
        }
    }
    Ok(out)
}

/// Produces the canonical sum-of-minterms expression for `bits` over
/// `width` inputs. Returns `"0"` if no minterm is set.
pub fn bits_to_expr(bits: u64, width: u32) -> String {
    let mut terms = Vec::new();
    for combo in 0u64..(1u64 << width) {
        if bits & (1 << combo) == 0 {
            continue;
        }
        let mut lits = Vec::new();
        for bit in 0..width {
            let var = format!("A{}", bit + 1);
            if combo & (1 << bit) != 0 {
                lits.push(var);
            } else {
                lits.push(format!("~{var}"));
            }
        }
        terms.push(lits.join("*"));
    }
    if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join("+")
    }
}

#[derive(Debug, Clone)]
enum Tok {
    Var(u32),
    Not,
    And,
    Or,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Result<Vec<Tok>> {
    let mut out = Vec::new();
    let bytes: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            '*' => {
                out.push(Tok::And);
                i += 1;
            }
            '+' => {
                out.push(Tok::Or);
                i += 1;
            }
            '~' => {
                out.push(Tok::Not);
                i += 1;
            }
            '(' => {
                out.push(Tok::LParen);
                i += 1;
            }
            ')' => {
                out.push(Tok::RParen);
                i += 1;
            }
            'A' => {
                let start = i;
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let num: String = bytes[start + 1..i].iter().collect();
                let idx: u32 = num.parse().map_err(|_| CodecError::FloorplanParseError {
                    line: 0,
                    message: format!("bad variable in boolean expression: {expr}"),
                })?;
                out.push(Tok::Var(idx - 1));
            }
            c => {
                return Err(CodecError::FloorplanParseError {
                    line: 0,
                    message: format!("unexpected character '{c}' in boolean expression: {expr}"),
                })
            }
        }
    }
    Ok(out)
}

/// Recursive-descent parse-and-evaluate: `or := and ('+' and)*`,
/// `and := unary ('*' unary)*`, `unary := '~'? primary`,
/// `primary := Var | '(' or ')'`.
fn eval(tokens: &[Tok], combo: u64) -> Result<bool> {
    let mut pos = 0;
    let result = eval_or(tokens, &mut pos, combo)?;
    Ok(result)
}

fn eval_or(tokens: &[Tok], pos: &mut usize, combo: u64) -> Result<bool> {
    let mut value = eval_and(tokens, pos, combo)?;
    while matches!(tokens.get(*pos), Some(Tok::Or)) {
        *pos += 1;
        value |= eval_and(tokens, pos, combo)?;
    }
    Ok(value)
}

fn eval_and(tokens: &[Tok], pos: &mut usize, combo: u64) -> Result<bool> {
    let mut value = eval_unary(tokens, pos, combo)?;
    while matches!(tokens.get(*pos), Some(Tok::And)) {
        *pos += 1;
        value &= eval_unary(tokens, pos, combo)?;
    }
    Ok(value)
}

fn eval_unary(tokens: &[Tok], pos: &mut usize, combo: u64) -> Result<bool> {
    if matches!(tokens.get(*pos), Some(Tok::Not)) {
        *pos += 1;
        return Ok(!eval_unary(tokens, pos, combo)?);
    }
    eval_primary(tokens, pos, combo)
}

fn eval_primary(tokens: &[Tok], pos: &mut usize, combo: u64) -> Result<bool> {
    match tokens.get(*pos) {
        Some(Tok::Var(idx)) => {
            *pos += 1;
            Ok(combo & (1 << idx) != 0)
        }
        Some(Tok::LParen) => {
            *pos += 1;
            let v = eval_or(tokens, pos, combo)?;
            if !matches!(tokens.get(*pos), Some(Tok::RParen)) {
                return Err(CodecError::FloorplanParseError {
                    line: 0,
                    message: "unbalanced parentheses in boolean expression".to_string(),
                });
            }
            *pos += 1;
            Ok(v)
        }
        other => Err(CodecError::FloorplanParseError {
            line: 0,
            message: format!("unexpected token {other:?} in boolean expression"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_of_two_vars() {
        let bits = parse_boolexpr("A1*A2", 6).unwrap();
        assert_eq!(bits & 0b11, 0b00);
        assert!(bits & (1 << 0b11) != 0);
    }

    #[test]
    fn roundtrip_through_canonical_form() {
        let bits = parse_boolexpr("A1*A2", 6).unwrap();
        let expr = bits_to_expr(bits, 6);
        let bits2 = parse_boolexpr(&expr, 6).unwrap();
        assert_eq!(bits, bits2);
    }

    #[test]
    fn negation_and_or() {
        let bits = parse_boolexpr("~A1+A2", 2).unwrap();
        // combo 0b00: ~A1=true -> true
        assert!(bits & 1 != 0);
        // combo 0b01 (A1=1,A2=0): ~A1=false, A2=false -> false
        assert_eq!(bits & 0b10, 0);
    }
}
