#[cfg(test)]
mod tests {
    use super::super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.runner.timeout_secs, 300);
        assert_eq!(config.runner.script, PathBuf::from("scripts/paper_qa.py"));
        assert_eq!(config.public.image_domains, vec!["example.com".to_string()]);
        assert_eq!(config.redirects, default_redirects());
        config.validate().unwrap();
    }

    #[test]
    fn test_default_with_redirects_matches_empty_file() {
        let from_file = Config::from_toml("").unwrap();
        let built = Config::default_with_redirects();
        assert_eq!(from_file.redirects, built.redirects);
        assert_eq!(from_file.public, built.public);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(r#"
            [runner]
            python = "/usr/bin/python3"
            timeout_secs = 60

            [[redirects]]
            source = "/docs"
            destination = "https://example.com/docs"
            permanent = false
        "#).unwrap();
        assert_eq!(config.runner.python, PathBuf::from("/usr/bin/python3"));
        assert_eq!(config.runner.corpus_root, PathBuf::from("."));
        assert_eq!(config.runner.timeout().as_secs(), 60);
        assert_eq!(config.redirects.len(), 1);
        assert!(!config.redirects[0].permanent);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default_with_redirects();
        config.apply_env(env(&[
            ("BIOMECHQA_BIND", "0.0.0.0:8080"),
            ("BIOMECHQA_CORPUS_ROOT", "/srv/corpus"),
            ("BIOMECHQA_TIMEOUT_SECS", " 120 "),
            ("NEXT_PUBLIC_API_URL", "https://api.example.com"),
        ])).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.runner.corpus_root, PathBuf::from("/srv/corpus"));
        assert_eq!(config.runner.timeout_secs, 120);
        assert_eq!(config.public.api_url.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn test_blank_public_api_url_means_same_origin() {
        let mut config = Config::default_with_redirects();
        config.public.api_url = Some("https://old".to_string());
        config.apply_env(env(&[("NEXT_PUBLIC_API_URL", "  ")])).unwrap();
        assert!(config.public.api_url.is_none());
    }

    #[test]
    fn test_bad_timeout_env_rejected() {
        let mut config = Config::default_with_redirects();
        let err = config.apply_env(env(&[("BIOMECHQA_TIMEOUT_SECS", "5m")])).unwrap_err();
        assert!(err.to_string().contains("BIOMECHQA_TIMEOUT_SECS"));
    }

    #[test]
    fn test_runner_config_from_script_section() {
        let config = Config::default_with_redirects();
        let runner = config.runner.runner_config();
        assert_eq!(runner.program, PathBuf::from("python"));
        assert_eq!(runner.timeout.as_secs(), 300);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default_with_redirects();
        config.runner.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_redirects() {
        let cases = [
            ("old-page", "/new"),
            ("/api/qa", "/elsewhere"),
            ("/", "/home"),
            ("/static/app.css", "/app.css"),
            ("/api/{path}", "/x"),
            ("/blog/:slug", "/x"),
            ("/empty", ""),
        ];
        for (source, destination) in cases {
            let mut config = Config::default_with_redirects();
            config.redirects = vec![RedirectRule {
                source: source.to_string(),
                destination: destination.to_string(),
                permanent: true,
            }];
            assert!(config.validate().is_err(), "{} -> {:?} should be rejected", source, destination);
        }
    }

    #[test]
    fn test_validate_rejects_duplicate_redirects() {
        let mut config = Config::default_with_redirects();
        config.redirects.push(config.redirects[0].clone());
        assert!(config.validate().unwrap_err().to_string().contains("duplicate"));
    }
}
