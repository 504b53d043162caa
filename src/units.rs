//! Built-in units of work for local runs.

use std::time::Duration;

use weft_runtime::{InvokeError, Registry};

/// Registry with the units available to `weft run`.
pub fn builtin() -> Registry {
  let mut registry = Registry::new();

  registry
    .register("echo", |inputs| async move { Ok(inputs.join(" ")) })
    .register("concat", |inputs| async move { Ok(inputs.concat()) })
    .register("upper", |inputs| async move {
      Ok(inputs.join(" ").to_uppercase())
    })
    .register("lower", |inputs| async move {
      Ok(inputs.join(" ").to_lowercase())
    })
    .register("reverse", |inputs| async move {
      Ok(inputs.join(" ").chars().rev().collect::<String>())
    })
    .register("count", |inputs| async move {
      Ok(inputs.iter().filter(|i| !i.is_empty()).count().to_string())
    })
    .register("sleep", sleep)
    .register("fail", |inputs| async move {
      let message = if inputs.iter().all(String::is_empty) {
        "failed on request".to_string()
      } else {
        inputs.join(" ")
      };
      Err(InvokeError::failed(message))
    });

  registry
}

async fn sleep(inputs: Vec<String>) -> Result<String, InvokeError> {
  let millis = parse_millis(inputs.first())?;
  tokio::time::sleep(Duration::from_millis(millis)).await;
  Ok(millis.to_string())
}

fn parse_millis(input: Option<&String>) -> Result<u64, InvokeError> {
  let raw = input.map(String::as_str).unwrap_or_default().trim();
  raw
    .parse()
    .map_err(|_| InvokeError::failed(format!("sleep expects milliseconds, got '{}'", raw)))
}

#[cfg(test)]
mod tests {
  use weft_runtime::{InvokeOptions, Invoker};

  use super::*;

  fn options() -> InvokeOptions {
    InvokeOptions {
      timeout: Duration::from_secs(1),
    }
  }

  async fn call(name: &str, inputs: &[&str]) -> Result<String, InvokeError> {
    let inputs = inputs.iter().map(|s| s.to_string()).collect();
    builtin().invoke(name, inputs, &options()).await
  }

  #[tokio::test]
  async fn test_string_units() {
    assert_eq!(call("echo", &["a", "b"]).await.unwrap(), "a b");
    assert_eq!(call("concat", &["a", "b"]).await.unwrap(), "ab");
    assert_eq!(call("upper", &["ab", "c"]).await.unwrap(), "AB C");
    assert_eq!(call("lower", &["AB"]).await.unwrap(), "ab");
    assert_eq!(call("reverse", &["abc"]).await.unwrap(), "cba");
    assert_eq!(call("count", &["a", "", "b"]).await.unwrap(), "2");
  }

  #[tokio::test]
  async fn test_sleep() {
    assert_eq!(call("sleep", &["5"]).await.unwrap(), "5");
    assert_eq!(
      call("sleep", &["soon"]).await.unwrap_err(),
      InvokeError::failed("sleep expects milliseconds, got 'soon'")
    );
  }

  #[tokio::test]
  async fn test_fail() {
    assert_eq!(
      call("fail", &[]).await.unwrap_err(),
      InvokeError::failed("failed on request")
    );
    assert_eq!(
      call("fail", &["bad", "input"]).await.unwrap_err(),
      InvokeError::failed("bad input")
    );
  }
}
