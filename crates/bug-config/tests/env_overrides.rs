use bug_config::BugConfig;
use figment::Jail;

#[test]
fn prefixed_env_vars_fill_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("BUGTRACKER_SERVER__PORT", "7000");
        jail.set_env("BUGTRACKER_DATABASE__URL", ":memory:");

        let config = BugConfig::load().expect("config loads");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.database.url, ":memory:");
        Ok(())
    });
}

#[test]
fn bare_port_variable_sets_server_port() {
    Jail::expect_with(|jail| {
        jail.set_env("PORT", "6123");

        let config = BugConfig::load().expect("config loads");
        assert_eq!(config.server.port, 6123);
        Ok(())
    });
}

#[test]
fn prefixed_port_beats_bare_port() {
    Jail::expect_with(|jail| {
        jail.set_env("PORT", "6123");
        jail.set_env("BUGTRACKER_SERVER__PORT", "7000");

        let config = BugConfig::load().expect("config loads");
        assert_eq!(config.server.port, 7000);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            bug_config::LOCAL_CONFIG_FILE,
            r#"
[server]
port = 8080
"#,
        )?;
        jail.set_env("BUGTRACKER_SERVER__PORT", "9090");

        let config = BugConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9090);
        Ok(())
    });
}

#[test]
fn blank_env_database_url_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("BUGTRACKER_DATABASE__URL", " ");
        assert!(BugConfig::load().is_err());
        Ok(())
    });
}
