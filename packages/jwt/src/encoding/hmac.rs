//! HMAC-SHA2 encoders (HS256, HS384, HS512).

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use super::Encoder;
use crate::error::{JwtError, JwtResult};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

macro_rules! hmac_encoder {
    ($(#[$doc:meta])* $name:ident, $mac:ty, $alg:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl Encoder for $name {
            #[inline]
            fn algorithm(&self) -> &'static str {
                $alg
            }

            fn mac(&self, message: &[u8], secret: &str) -> JwtResult<Vec<u8>> {
                let mut mac = <$mac>::new_from_slice(secret.as_bytes())
                    .map_err(|_| JwtError::invalid_key("Invalid HMAC key"))?;
                mac.update(message);
                Ok(mac.finalize().into_bytes().to_vec())
            }
        }
    };
}

hmac_encoder!(
    /// HMAC using SHA-256
    Hs256,
    HmacSha256,
    "HS256"
);
hmac_encoder!(
    /// HMAC using SHA-384
    Hs384,
    HmacSha384,
    "HS384"
);
hmac_encoder!(
    /// HMAC using SHA-512
    Hs512,
    HmacSha512,
    "HS512"
);

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // RFC 4231 test case 2
    const KEY: &str = "Jefe";
    const DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn test_hs256_rfc4231_vector() {
        let mac = Hs256.mac(DATA, KEY).expect("HMAC-SHA256 should succeed");
        assert_eq!(
            mac,
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843").to_vec()
        );
    }

    #[test]
    fn test_hs384_rfc4231_vector() {
        let mac = Hs384.mac(DATA, KEY).expect("HMAC-SHA384 should succeed");
        assert_eq!(
            mac,
            hex!(
                "af45d2e376484031617f78d2b58a6b1b9c7ef464f5a01b47e42ec3736322445e"
                "8e2240ca5e69e2c78b3239ecfab21649"
            )
            .to_vec()
        );
    }

    #[test]
    fn test_hs512_rfc4231_vector() {
        let mac = Hs512.mac(DATA, KEY).expect("HMAC-SHA512 should succeed");
        assert_eq!(
            mac,
            hex!(
                "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554"
                "9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
            )
            .to_vec()
        );
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Hs256.algorithm(), "HS256");
        assert_eq!(Hs384.algorithm(), "HS384");
        assert_eq!(Hs512.algorithm(), "HS512");
    }
}
