//! Postfix (reverse Polish) arithmetic.

/// Error from evaluating a postfix expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PostfixError {
    /// The expression has no tokens
    #[error("empty expression")]
    Empty,

    /// A token is neither a number nor an operator
    #[error("invalid token: {0:?}")]
    InvalidToken(String),

    /// An operator ran out of operands
    #[error("not enough operands for '{operator}'")]
    StackUnderflow { operator: char },

    /// Operands were left over once every operator was applied
    #[error("{0} operands left unused")]
    LeftoverOperands(usize),
}

/// Evaluate a whitespace-separated postfix expression.
///
/// Numbers are pushed; each of `+ - * /` pops two operands and pushes the
/// result. The operand pushed first is the left-hand side.
///
/// # Examples
///
/// ```
/// use virus_route::virus::evaluate_postfix;
///
/// assert_eq!(evaluate_postfix("7 3 + 8 - 2 * 2 /"), Ok(2.0));
/// assert_eq!(evaluate_postfix("10 4 -"), Ok(6.0));
/// assert!(evaluate_postfix("1 +").is_err());
/// ```
pub fn evaluate_postfix(expression: &str) -> Result<f64, PostfixError> {
    let mut stack: Vec<f64> = Vec::new();

    for token in expression.split_whitespace() {
        let operator = match token {
            "+" | "-" | "*" | "/" => token.chars().next(),
            _ => None,
        };

        let Some(operator) = operator else {
            let value = token
                .parse::<f64>()
                .map_err(|_| PostfixError::InvalidToken(token.to_string()))?;
            stack.push(value);
            continue;
        };

        let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
            return Err(PostfixError::StackUnderflow { operator });
        };

        stack.push(match operator {
            '+' => left + right,
            '-' => left - right,
            '*' => left * right,
            _ => left / right,
        });
    }

    match stack.len() {
        0 => Err(PostfixError::Empty),
        1 => Ok(stack[0]),
        n => Err(PostfixError::LeftoverOperands(n - 1)),
    }
}
