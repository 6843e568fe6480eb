/// Connection settings for a Neo4j server reached through its HTTP API.
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    /// Base URL of the HTTP endpoint, e.g. `http://localhost:7474`
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Name of the database statements run against (default: `neo4j`)
    pub database: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "http://localhost:7474".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: "neo4j".to_string(),
        }
    }
}

impl Neo4jConfig {
    pub fn new<S: AsRef<str>>(uri: S) -> Self {
        Self {
            uri: uri.as_ref().to_string(),
            ..Default::default()
        }
    }

    pub fn with_credentials(mut self, user: &str, password: &str) -> Self {
        self.user = user.to_string();
        self.password = password.to_string();
        self
    }

    pub fn with_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    /// Endpoint that begins explicit transactions.
    pub fn transaction_endpoint(&self) -> String {
        format!(
            "{}/db/{}/tx",
            self.uri.trim_end_matches('/'),
            self.database
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_endpoint_ignores_trailing_slash() {
        let config = Neo4jConfig::new("http://db.internal:7474/").with_database("movies");

        assert_eq!(
            config.transaction_endpoint(),
            "http://db.internal:7474/db/movies/tx"
        );
    }

    #[test]
    fn credentials_override_defaults() {
        let config = Neo4jConfig::default().with_credentials("admin", "secret");

        assert_eq!(config.user, "admin");
        assert_eq!(config.password, "secret");
        assert_eq!(config.database, "neo4j");
    }
}
