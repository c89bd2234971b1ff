//! Restore-list temporary-table token validation.

/// Validates `^b2[0-9]+$`.
pub fn is_valid(token: &str) -> bool {
	token
		.strip_prefix("b2")
		.map(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
		.unwrap_or(false)
}

/// The scratch relation name that always accompanies `<token>`.
pub fn scratch_name(token: &str) -> String {
	format!("btemp{token}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_valid_tokens() {
		assert!(is_valid("b2100"));
		assert!(is_valid("b20"));
	}

	#[test]
	fn rejects_malformed_tokens() {
		assert!(!is_valid("b2"));
		assert!(!is_valid("b2abc"));
		assert!(!is_valid("abc100"));
		assert!(!is_valid(""));
		assert!(!is_valid("b2-1"));
	}

	#[test]
	fn scratch_name_prefixes_btemp() {
		assert_eq!(scratch_name("b2100"), "btempb2100");
	}
}
