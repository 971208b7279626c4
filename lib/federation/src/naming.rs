/// Replaces every character that may not appear in an identifier (anything but ASCII letters,
/// digits and `_`) with `_`.
pub fn canonify_string(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("acme", "acme")]
    #[case("ACME Corp.", "ACME_Corp_")]
    #[case("tensile-tests_2024", "tensile_tests_2024")]
    #[case("Fraunhofer IWM/Stahl", "Fraunhofer_IWM_Stahl")]
    #[case("Müller", "M_ller")]
    #[case("", "")]
    fn test_canonify_string(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(canonify_string(name), expected);
    }
}
