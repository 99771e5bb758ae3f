//! Client for a prompt-driven calculator program.

use log::{debug, warn};

use super::operation::Operation;
use crate::error::{ClientError, Result};
use crate::session::{InteractiveBuilder, Session};

/// Prompt and result texts of the calculator protocol.
#[derive(Debug, Clone)]
pub struct CalculatorPrompts {
    pub first_number: String,
    pub second_number: String,
    pub operation: String,
    pub result_label: String,
}

impl Default for CalculatorPrompts {
    fn default() -> Self {
        Self {
            first_number: "Please enter the first number: ".to_string(),
            second_number: "Please enter the second number: ".to_string(),
            operation: "Please enter the operation: ".to_string(),
            result_label: "Result: ".to_string(),
        }
    }
}

/// Drives a calculator child one calculation at a time.
///
/// A failed calculation closes the session before the error is returned,
/// so the child is never left running behind a broken exchange.
pub struct Calculator<'a> {
    session: &'a mut Session,
    prompts: CalculatorPrompts,
}

impl<'a> Calculator<'a> {
    /// Use the default prompts.
    pub fn new(session: &'a mut Session) -> Self {
        Self::with_prompts(session, CalculatorPrompts::default())
    }

    pub fn with_prompts(session: &'a mut Session, prompts: CalculatorPrompts) -> Self {
        Self { session, prompts }
    }

    /// Compute `lhs <op> rhs` on the child.
    pub async fn calculate(&mut self, lhs: i64, op: Operation, rhs: i64) -> Result<i64> {
        match self.exchange(lhs, op, rhs).await {
            Ok(value) => Ok(value),
            Err(e) => {
                if let Err(close_err) = self.session.close().await {
                    warn!("failed to close calculator session: {}", close_err);
                }
                Err(e)
            }
        }
    }

    async fn exchange(&mut self, lhs: i64, op: Operation, rhs: i64) -> Result<i64> {
        let events = InteractiveBuilder::new()
            .expect(self.prompts.first_number.as_str())
            .send(lhs.to_string())
            .expect(self.prompts.second_number.as_str())
            .send(rhs.to_string())
            .expect(self.prompts.operation.as_str())
            .send(op.symbol())
            .build();

        self.session.send_interactive(&events).await?;

        let raw = self.session.read_labeled(&self.prompts.result_label).await?;
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ClientError::UnexpectedResponse {
                expected: format!("{}<integer>", self.prompts.result_label),
                line: format!("{}{}", self.prompts.result_label, raw),
            })?;

        debug!("{} {} {} = {}", lhs, op.symbol(), rhs, value);
        Ok(value)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    /// A shell stand-in for the calculator program.
    const CALCULATOR_SCRIPT: &str = r#"
while :; do
  printf 'Please enter the first number: '
  read a || exit 0
  printf 'Please enter the second number: '
  read b || exit 0
  printf 'Please enter the operation: '
  read op || exit 0
  case "$op" in
    +) echo "Result: $((a + b))" ;;
    -) echo "Result: $((a - b))" ;;
    '*') echo "Result: $((a * b))" ;;
    /) if [ "$b" -eq 0 ]; then echo "Error: division by zero"; else echo "Result: $((a / b))"; fi ;;
    *) echo "Error: unknown operation" ;;
  esac
done
"#;

    fn calculator_session() -> Session {
        Session::builder("sh")
            .arg("-c")
            .arg(CALCULATOR_SCRIPT)
            .spawn()
            .unwrap()
    }

    #[tokio::test]
    async fn test_calculations() {
        let mut session = calculator_session();
        {
            let mut calc = Calculator::new(&mut session);
            assert_eq!(calc.calculate(7, Operation::Add, 5).await.unwrap(), 12);
            assert_eq!(calc.calculate(7, Operation::Subtract, 10).await.unwrap(), -3);
            assert_eq!(calc.calculate(6, Operation::Multiply, 7).await.unwrap(), 42);
            assert_eq!(calc.calculate(9, Operation::Divide, 2).await.unwrap(), 4);
        }
        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_operation_by_name() {
        let mut session = calculator_session();
        let op: Operation = "mul".parse().unwrap();
        let value = Calculator::new(&mut session).calculate(3, op, 4).await.unwrap();
        assert_eq!(value, 12);
        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_failure_closes_session() {
        let mut session = calculator_session();

        let err = Calculator::new(&mut session)
            .calculate(1, Operation::Divide, 0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Client(ClientError::UnexpectedResponse { .. })
        ));
        assert!(session.is_closed());
    }
}
