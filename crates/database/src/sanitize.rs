use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TRANSACTION_KEYWORDS: Regex = Regex::new(r"(?i)\b(?:BEGIN|COMMIT)\b").unwrap();
}

/// Strips explicit transaction control and statement separators from a query.
///
/// The target deployment only accepts a single implicit-transaction statement.
/// This does not restrict what the statement itself may read or write.
pub fn sanitize_cypher(cypher: &str) -> String {
    TRANSACTION_KEYWORDS
        .replace_all(cypher, "")
        .replace(';', "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_commit_and_semicolons() {
        assert_eq!(
            sanitize_cypher("MATCH (n) RETURN n; COMMIT;"),
            "MATCH (n) RETURN n"
        );
    }

    #[test]
    fn strips_keywords_case_insensitively() {
        assert_eq!(
            sanitize_cypher("begin CREATE (n:Person {name: 'Ada'}) Commit"),
            "CREATE (n:Person {name: 'Ada'})"
        );
    }

    #[test]
    fn keeps_keywords_inside_identifiers() {
        assert_eq!(
            sanitize_cypher("MATCH (n:Beginner) SET n.committed = true"),
            "MATCH (n:Beginner) SET n.committed = true"
        );
    }

    #[test]
    fn removes_every_semicolon() {
        assert_eq!(sanitize_cypher("RETURN ';'"), "RETURN ''");
    }

    #[test]
    fn empty_query_stays_empty() {
        assert_eq!(sanitize_cypher("  BEGIN; COMMIT;  "), "");
    }
}
