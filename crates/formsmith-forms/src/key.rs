//! Field name to lookup key transformation

/// Transform an array-style field name into the dotted key used to look
/// values up in old input, request data, models and error bags.
///
/// Literal dots are replaced first so they cannot collide with the injected
/// separator; then `[]` is stripped and `[x]` becomes `.x`.
///
/// # Examples
///
/// ```
/// use formsmith_forms::transform_key;
///
/// assert_eq!(transform_key("user[address][city]"), "user.address.city");
/// assert_eq!(transform_key("tags[]"), "tags");
/// assert_eq!(transform_key("first.name"), "first_name");
/// assert_eq!(transform_key("a.b[c]"), "a_b.c");
/// ```
pub fn transform_key(name: &str) -> String {
	name.replace('.', "_")
		.replace("[]", "")
		.replace('[', ".")
		.replace(']', "")
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("email", "email")]
	#[case("items[]", "items")]
	#[case("items[0][]", "items.0")]
	#[case("options[colors][]", "options.colors")]
	#[case("v1.2[x]", "v1_2.x")]
	#[case("", "")]
	fn test_transform_key(#[case] name: &str, #[case] expected: &str) {
		assert_eq!(transform_key(name), expected);
	}

	proptest! {
		#[test]
		fn transformed_keys_have_no_brackets(name in "[a-z\\[\\]\\.]{0,24}") {
			let key = transform_key(&name);
			prop_assert!(!key.contains('['));
			prop_assert!(!key.contains(']'));
		}

		#[test]
		fn plain_names_are_unchanged(name in "[a-z_][a-z0-9_]{0,16}") {
			prop_assert_eq!(transform_key(&name), name);
		}

		#[test]
		fn nested_names_become_dotted(parts in proptest::collection::vec("[a-z]{1,6}", 1..5)) {
			let name = format!(
				"{}{}",
				parts[0],
				parts[1..].iter().map(|p| format!("[{}]", p)).collect::<String>()
			);
			prop_assert_eq!(transform_key(&name), parts.join("."));
		}
	}
}
