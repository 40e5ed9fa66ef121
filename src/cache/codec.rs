//! JSON pass-through codec for typed values.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        visits: u32,
    }

    #[test]
    fn test_encode_decode_struct() {
        let profile = Profile {
            name: "what about german characters like ä ü ö and ß?".to_string(),
            visits: 3,
        };
        let bytes = encode(&profile).unwrap();
        assert_eq!(decode::<Profile>(&bytes).unwrap(), profile);
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode::<Profile>(b"\x00\x01");
        assert!(matches!(result, Err(CacheError::Codec(_))));
    }
}
