use crate::{
    constants::{UINT64_MAX, UINT64_MAX_SQRT},
    errors::ConsensusError,
};

/// Return the largest integer ``x`` such that ``x**2 <= n``.
pub fn integer_squareroot(n: u64) -> u64 {
    if n == UINT64_MAX {
        return UINT64_MAX_SQRT;
    }

    let mut x = n;
    let mut y = x.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// [`integer_squareroot`] for callers holding a signed value. Negative input is rejected.
pub fn integer_squareroot_signed(n: i64) -> Result<u64, ConsensusError> {
    let n = u64::try_from(n).map_err(|_| {
        ConsensusError::InvalidArgument(format!("integer_squareroot of negative value {n}"))
    })?;
    Ok(integer_squareroot(n))
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(3, 1)]
    #[case(4, 2)]
    #[case(27, 5)]
    #[case(3481, 59)]
    #[case(u64::MAX - 1, 4294967295)]
    #[case(u64::MAX, 4294967295)]
    fn test_integer_squareroot(#[case] n: u64, #[case] expected: u64) {
        assert_eq!(integer_squareroot(n), expected);
    }

    #[test]
    fn test_perfect_squares() {
        for n in (0..100_000u64).chain((1 << 32) - 1_000..(1 << 32)) {
            assert_eq!(integer_squareroot(n * n), n);
        }
    }

    #[test]
    fn test_random_floor() {
        let mut rng = rand::rng();
        for _ in 0..10_000 {
            let n: u64 = rng.random();
            let root = integer_squareroot(n) as u128;
            assert!(root * root <= n as u128);
            assert!((root + 1) * (root + 1) > n as u128);
        }
    }

    #[test]
    fn test_negative_input_is_rejected() {
        assert_eq!(integer_squareroot_signed(27).unwrap(), 5);
        assert!(matches!(
            integer_squareroot_signed(-1),
            Err(ConsensusError::InvalidArgument(_))
        ));
    }
}
