//! SEC1 point compression for secp256r1 (Profile B)
//!
//! Profile B transmits the ephemeral public key as a 33-byte compressed
//! point and configures the home network public key the same way. Recovery
//! of `y` solves `y^2 = x^3 - 3x + b (mod p)`; because `p = 3 (mod 4)` the
//! square root is a single exponentiation by `(p + 1) / 4`.

use crypto_bigint::modular::constant_mod::{Residue, ResidueParams};
use crypto_bigint::{impl_modulus, Encoding, U256};

use crate::error::{CryptoError, CryptoResult};

/// Field element size in bytes
pub const COORDINATE_SIZE: usize = 32;

/// Compressed point size in bytes (prefix + x-coordinate)
pub const COMPRESSED_POINT_SIZE: usize = COORDINATE_SIZE + 1;

/// Prefix byte of a compressed point with even `y`
pub const PREFIX_EVEN: u8 = 0x02;

/// Prefix byte of a compressed point with odd `y`
pub const PREFIX_ODD: u8 = 0x03;

impl_modulus!(
    P256Prime,
    U256,
    "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"
);

type FieldElement = Residue<P256Prime, { U256::LIMBS }>;

const CURVE_B: U256 =
    U256::from_be_hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b");

/// (p + 1) / 4
const SQRT_EXPONENT: U256 =
    U256::from_be_hex("3fffffffc0000000400000000000000000000000400000000000000000000000");

/// Affine coordinates as big-endian 32-byte strings.
pub type Coordinates = ([u8; COORDINATE_SIZE], [u8; COORDINATE_SIZE]);

fn field_element(bytes: &[u8; COORDINATE_SIZE]) -> Option<FieldElement> {
    let value = U256::from_be_bytes(*bytes);
    (value < P256Prime::MODULUS).then(|| FieldElement::new(&value))
}

/// x^3 - 3x + b
fn curve_rhs(x: FieldElement) -> FieldElement {
    let three = FieldElement::new(&U256::from_u8(3));
    let b = FieldElement::new(&CURVE_B);
    x.square() * x - three * x + b
}

fn left_pad(value: &[u8]) -> CryptoResult<[u8; COORDINATE_SIZE]> {
    if value.len() > COORDINATE_SIZE {
        return Err(CryptoError::InvalidFormat("coordinate longer than 32 bytes"));
    }
    let mut out = [0u8; COORDINATE_SIZE];
    out[COORDINATE_SIZE - value.len()..].copy_from_slice(value);
    Ok(out)
}

/// Compress an affine point into its 33-byte SEC1 form.
///
/// `x` and `y` are big-endian and may be shorter than 32 bytes (leading
/// zero bytes stripped); `x` is left-padded in the output.
pub fn compress(x: &[u8], y: &[u8]) -> CryptoResult<[u8; COMPRESSED_POINT_SIZE]> {
    let x = left_pad(x)?;
    let y = left_pad(y)?;

    let mut out = [0u8; COMPRESSED_POINT_SIZE];
    out[0] = if y[COORDINATE_SIZE - 1] & 1 == 1 {
        PREFIX_ODD
    } else {
        PREFIX_EVEN
    };
    out[1..].copy_from_slice(&x);
    Ok(out)
}

/// Recover the affine coordinates of a 33-byte compressed point.
///
/// # Errors
/// * `InvalidFormat` - wrong length, unknown prefix, or `x >= p`
/// * `NoSquareRoot` - `x^3 - 3x + b` is not a quadratic residue
pub fn decompress(bytes: &[u8]) -> CryptoResult<Coordinates> {
    if bytes.len() != COMPRESSED_POINT_SIZE {
        return Err(CryptoError::InvalidFormat("compressed point must be 33 bytes"));
    }
    let want_odd = match bytes[0] {
        PREFIX_EVEN => false,
        PREFIX_ODD => true,
        _ => return Err(CryptoError::InvalidFormat("compressed point prefix must be 0x02 or 0x03")),
    };

    let mut x_bytes = [0u8; COORDINATE_SIZE];
    x_bytes.copy_from_slice(&bytes[1..]);
    let x = field_element(&x_bytes)
        .ok_or(CryptoError::InvalidFormat("x-coordinate is not reduced modulo p"))?;

    let y_squared = curve_rhs(x);
    let root = y_squared.pow(&SQRT_EXPONENT);
    if root.square().retrieve() != y_squared.retrieve() {
        return Err(CryptoError::NoSquareRoot);
    }

    let root = root.retrieve();
    let root_is_odd = root.to_be_bytes()[COORDINATE_SIZE - 1] & 1 == 1;
    let y = if root_is_odd == want_odd {
        root
    } else if root == U256::ZERO {
        // y = 0 has no odd counterpart
        return Err(CryptoError::NoSquareRoot);
    } else {
        P256Prime::MODULUS.wrapping_sub(&root)
    };

    Ok((x_bytes, y.to_be_bytes()))
}

/// Check the curve equation for affine coordinates.
///
/// `(0, 0)` stands for the point at infinity and is accepted here so that
/// general curve arithmetic can pass it around. Anything that validates a
/// peer public key must reject it separately.
pub fn is_on_curve(x: &[u8; COORDINATE_SIZE], y: &[u8; COORDINATE_SIZE]) -> bool {
    if is_infinity(x, y) {
        return true;
    }
    match (field_element(x), field_element(y)) {
        (Some(x), Some(y)) => y.square().retrieve() == curve_rhs(x).retrieve(),
        _ => false,
    }
}

/// Returns true for the `(0, 0)` encoding of the point at infinity.
pub fn is_infinity(x: &[u8; COORDINATE_SIZE], y: &[u8; COORDINATE_SIZE]) -> bool {
    x.iter().chain(y.iter()).all(|&b| b == 0)
}
