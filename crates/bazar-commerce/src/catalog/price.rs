//! Lenient price decoding.
//!
//! The catalog serializes numeric columns either as JSON numbers or as
//! decimal strings depending on the driver, so both are accepted.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => Ok(n),
        RawPrice::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid price {:?}: {}", s, e))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "super::deserialize")]
        price: f64,
    }

    #[test]
    fn test_number_and_string_prices() {
        let a: Priced = serde_json::from_str(r#"{"price": 79.99}"#).unwrap();
        let b: Priced = serde_json::from_str(r#"{"price": "79.99"}"#).unwrap();
        assert_eq!(a.price, b.price);
    }

    #[test]
    fn test_garbage_price_rejected() {
        assert!(serde_json::from_str::<Priced>(r#"{"price": "free"}"#).is_err());
    }
}
