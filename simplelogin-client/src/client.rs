// simplelogin-client/src/client.rs
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::prompt::Prompt;
use simplelogin_api::{
    Alias, AliasFilter, AliasMode, AliasOptions, ApiClient, ApiError, Domain, DomainPatch,
    HttpClient, Mailbox, NewCustomAlias, Paged, ReqwestClient, TrashedAlias, UserSettings,
    UserStats,
};
use tracing::debug;

/// Parameters of a custom alias
#[derive(Debug, Clone, Default)]
pub struct CustomAliasRequest {
    pub prefix: String,
    pub mailbox_ids: Vec<u64>,
    pub note: Option<String>,
    pub name: Option<String>,
    /// Suffix as displayed (e.g. `.abc@simplelogin.co`); asked for when unset
    pub suffix: Option<String>,
}

/// Domain fields to change; `None` leaves the server value alone
#[derive(Debug, Clone, Default)]
pub struct DomainUpdate {
    pub catch_all: Option<bool>,
    pub random_prefix_generation: Option<bool>,
    pub name: Option<String>,
    /// Comma separated mailbox ids
    pub mailbox_ids: Option<String>,
}

#[derive(Debug)]
pub enum UpdateOutcome {
    NoChanges,
    Updated(Domain),
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { email: String },
    Cancelled { email: String },
}

/// Authenticated client for one account
pub struct SimpleLoginClient<C: HttpClient = ReqwestClient> {
    api: ApiClient<C>,
}

impl SimpleLoginClient<ReqwestClient> {
    pub fn from_settings(settings: &Settings, token: Option<String>) -> Result<Self> {
        let http = ReqwestClient::with_timeout(settings.timeout).map_err(ApiError::from)?;
        let mut api = ApiClient::new(http, settings.api_url.clone());
        if let Some(token) = token {
            api = api.with_token(token);
        }
        Ok(Self::new(api))
    }
}

impl<C: HttpClient> SimpleLoginClient<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    // Account

    pub async fn user_settings(&self) -> Result<UserSettings> {
        Ok(self.api.user_settings().await?)
    }

    pub async fn user_stats(&self) -> Result<UserStats> {
        Ok(self.api.user_stats().await?)
    }

    // Aliases

    pub async fn list_aliases(&self, filter: AliasFilter) -> Paged<Alias> {
        self.api.list_aliases(filter).await
    }

    pub async fn alias_page(&self, page: u32, filter: AliasFilter) -> Result<Vec<Alias>> {
        Ok(self.api.alias_page(page, filter).await?)
    }

    pub async fn get_alias(&self, id: u64) -> Result<Alias> {
        Ok(self.api.get_alias(id).await?)
    }

    pub async fn create_random_alias(
        &self,
        mode: Option<&str>,
        note: Option<&str>,
    ) -> Result<Alias> {
        let mode = mode.map(str::parse::<AliasMode>).transpose()?;
        Ok(self.api.create_random_alias(mode, note).await?)
    }

    pub async fn get_alias_options(&self) -> Result<AliasOptions> {
        Ok(self.api.alias_options().await?)
    }

    /// Create an alias from a prefix and one of the currently offered suffixes
    ///
    /// Suffix tokens are fetched for every call and never reused.
    pub async fn create_custom_alias(
        &self,
        request: CustomAliasRequest,
        prompt: &dyn Prompt,
    ) -> Result<Alias> {
        if request.mailbox_ids.is_empty() {
            return Err(ApiError::InvalidArgument("at least one mailbox is required".to_string()).into());
        }

        let options = self.get_alias_options().await?;
        if !options.can_create {
            return Err(Error::CreationDisabled);
        }

        let signed_suffix = match &request.suffix {
            Some(wanted) => options
                .find_suffix(wanted)
                .map(|s| s.signed_suffix.clone())
                .ok_or_else(|| {
                    Error::InvalidSelection(format!("suffix '{}' is not offered by the server", wanted))
                })?,
            None => {
                if options.suffixes.is_empty() {
                    return Err(Error::InvalidSelection("the server offered no suffixes".to_string()));
                }
                let labels: Vec<String> = options
                    .suffixes
                    .iter()
                    .map(|s| format!("{}{}", request.prefix, s.suffix))
                    .collect();
                let index = prompt.select("Select a suffix", &labels)?;
                options
                    .suffixes
                    .get(index)
                    .map(|s| s.signed_suffix.clone())
                    .ok_or_else(|| Error::InvalidSelection(format!("no suffix at position {}", index)))?
            }
        };

        let body = NewCustomAlias {
            alias_prefix: request.prefix,
            signed_suffix,
            mailbox_ids: request.mailbox_ids,
            note: request.note,
            name: request.name,
        };
        Ok(self.api.create_custom_alias(&body).await?)
    }

    /// Let the user pick the mailboxes a new alias forwards to
    pub async fn pick_mailboxes(&self, prompt: &dyn Prompt) -> Result<Vec<u64>> {
        let mailboxes = self.list_mailboxes().await?;
        let labels: Vec<String> = mailboxes.iter().map(|m| m.email.clone()).collect();

        let chosen = prompt.multi_select("Select mailboxes", &labels)?;
        let ids: Vec<u64> = chosen
            .into_iter()
            .filter_map(|i| mailboxes.get(i).map(|m| m.id))
            .collect();

        if ids.is_empty() {
            return Err(ApiError::InvalidArgument("at least one mailbox is required".to_string()).into());
        }
        Ok(ids)
    }

    /// Flip an alias and report the new state
    ///
    /// The state is derived from the one read before the toggle, not re-read.
    pub async fn toggle_alias(&self, id: u64) -> Result<bool> {
        let alias = self.api.get_alias(id).await?;
        let reported = self.api.toggle_alias(id).await?;
        debug!(id, was_enabled = alias.enabled, ?reported, "toggled alias");
        Ok(!alias.enabled)
    }

    pub async fn delete_alias(&self, id: u64, prompt: &dyn Prompt) -> Result<DeleteOutcome> {
        let alias = self.api.get_alias(id).await?;
        let question = format!("Delete alias {}? This cannot be undone", alias.email);

        if !prompt.confirm(&question)? {
            return Ok(DeleteOutcome::Cancelled { email: alias.email });
        }

        self.api.delete_alias(id).await?;
        Ok(DeleteOutcome::Deleted { email: alias.email })
    }

    // Custom domains

    pub async fn list_domains(&self) -> Result<Vec<Domain>> {
        Ok(self.api.custom_domains().await?)
    }

    /// There is no single-domain endpoint, so this scans the full list
    pub async fn domain_info(&self, id: u64) -> Result<Domain> {
        self.list_domains()
            .await?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::NotFound(format!("domain {}", id)))
    }

    pub async fn update_domain(&self, id: u64, update: DomainUpdate) -> Result<UpdateOutcome> {
        let mailbox_ids = update.mailbox_ids.as_deref().map(parse_id_list).transpose()?;
        let patch = DomainPatch {
            catch_all: update.catch_all,
            random_prefix_generation: update.random_prefix_generation,
            name: update.name,
            mailbox_ids,
        };

        if patch.is_empty() {
            return Ok(UpdateOutcome::NoChanges);
        }

        let domain = self.api.update_custom_domain(id, &patch).await?;
        Ok(UpdateOutcome::Updated(domain))
    }

    pub async fn domain_trash(&self, id: u64) -> Result<Vec<TrashedAlias>> {
        Ok(self.api.custom_domain_trash(id).await?)
    }

    // Mailboxes

    pub async fn list_mailboxes(&self) -> Result<Vec<Mailbox>> {
        Ok(self.api.mailboxes().await?)
    }
}

/// Parse `"1, 2,3"` into ids
pub fn parse_id_list(raw: &str) -> std::result::Result<Vec<u64>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>().map_err(|_| {
                ApiError::InvalidArgument(format!("'{}' is not a valid mailbox id in '{}'", part, raw))
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .and_then(|ids| {
            if ids.is_empty() {
                Err(ApiError::InvalidArgument("mailbox id list is empty".to_string()))
            } else {
                Ok(ids)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPrompt;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> SimpleLoginClient {
        SimpleLoginClient::new(ApiClient::new(ReqwestClient::new(), server.uri()).with_token("tok"))
    }

    fn alias_json(id: u64, email: &str, enabled: bool) -> Value {
        json!({
            "id": id,
            "email": email,
            "enabled": enabled,
            "creation_timestamp": 1700000000,
        })
    }

    fn options_json(can_create: bool) -> Value {
        json!({
            "can_create": can_create,
            "prefix_suggestion": "shop",
            "suffixes": [
                {"suffix": ".a1@simplelogin.co", "signed_suffix": ".a1@simplelogin.co.SIG1", "is_custom": false, "is_premium": false},
                {"suffix": "@mydomain.org", "signed_suffix": "@mydomain.org.SIG2", "is_custom": true, "is_premium": false}
            ]
        })
    }

    async fn mount_options(server: &MockServer, can_create: bool) {
        Mock::given(method("GET"))
            .and(path("/api/v5/alias/options"))
            .respond_with(ResponseTemplate::new(200).set_body_json(options_json(can_create)))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn count(server: &MockServer, verb: &str) -> usize {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.method.as_str() == verb)
            .count()
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1,2, 3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list("7").unwrap(), vec![7]);
        assert!(matches!(parse_id_list("1,x"), Err(ApiError::InvalidArgument(_))));
        assert!(matches!(parse_id_list(" , "), Err(ApiError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_random_alias_invalid_mode_is_local() {
        let server = MockServer::start().await;

        let err = client(&server)
            .create_random_alias(Some("emoji"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::InvalidArgument(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_random_alias_without_mode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/alias/random/new"))
            .respond_with(ResponseTemplate::new(201).set_body_json(alias_json(5, "x@sl.co", true)))
            .expect(1)
            .mount(&server)
            .await;

        let alias = client(&server).create_random_alias(None, None).await.unwrap();
        assert_eq!(alias.email, "x@sl.co");
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn test_custom_alias_with_named_suffix() {
        let server = MockServer::start().await;
        mount_options(&server, true).await;
        Mock::given(method("POST"))
            .and(path("/api/v3/alias/custom/new"))
            .and(body_json(json!({
                "alias_prefix": "shop",
                "signed_suffix": "@mydomain.org.SIG2",
                "mailbox_ids": [1],
                "note": "online store",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(alias_json(8, "shop@mydomain.org", true)))
            .expect(1)
            .mount(&server)
            .await;

        let prompt = ScriptedPrompt::default();
        let request = CustomAliasRequest {
            prefix: "shop".to_string(),
            mailbox_ids: vec![1],
            note: Some("online store".to_string()),
            suffix: Some("@mydomain.org".to_string()),
            ..Default::default()
        };
        let alias = client(&server).create_custom_alias(request, &prompt).await.unwrap();

        assert_eq!(alias.email, "shop@mydomain.org");
        assert!(prompt.asked().is_empty());
    }

    #[tokio::test]
    async fn test_custom_alias_prompts_for_suffix() {
        let server = MockServer::start().await;
        mount_options(&server, true).await;
        Mock::given(method("POST"))
            .and(path("/api/v3/alias/custom/new"))
            .and(body_json(json!({
                "alias_prefix": "news",
                "signed_suffix": ".a1@simplelogin.co.SIG1",
                "mailbox_ids": [2, 3],
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(alias_json(9, "news.a1@simplelogin.co", true)))
            .expect(1)
            .mount(&server)
            .await;

        let prompt = ScriptedPrompt::default().with_select(0);
        let request = CustomAliasRequest {
            prefix: "news".to_string(),
            mailbox_ids: vec![2, 3],
            ..Default::default()
        };
        client(&server).create_custom_alias(request, &prompt).await.unwrap();
        assert_eq!(prompt.asked(), vec!["Select a suffix".to_string()]);
    }

    #[tokio::test]
    async fn test_custom_alias_unknown_suffix_fails_locally() {
        let server = MockServer::start().await;
        mount_options(&server, true).await;

        let request = CustomAliasRequest {
            prefix: "shop".to_string(),
            mailbox_ids: vec![1],
            suffix: Some("@stale.example".to_string()),
            ..Default::default()
        };
        let err = client(&server)
            .create_custom_alias(request, &ScriptedPrompt::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidSelection(_)));
        assert_eq!(count(&server, "POST").await, 0);
    }

    #[tokio::test]
    async fn test_custom_alias_creation_disabled() {
        let server = MockServer::start().await;
        mount_options(&server, false).await;

        let request = CustomAliasRequest {
            prefix: "shop".to_string(),
            mailbox_ids: vec![1],
            suffix: Some("@mydomain.org".to_string()),
            ..Default::default()
        };
        let err = client(&server)
            .create_custom_alias(request, &ScriptedPrompt::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::CreationDisabled));
        assert_eq!(count(&server, "POST").await, 0);
    }

    #[tokio::test]
    async fn test_pick_mailboxes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/mailboxes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "mailboxes": [
                    {"id": 10, "email": "a@example.com", "default": true, "creation_timestamp": 1},
                    {"id": 11, "email": "b@example.com", "default": false, "creation_timestamp": 2}
                ]
            })))
            .mount(&server)
            .await;

        let prompt = ScriptedPrompt::default().with_multi_select(vec![1]);
        let ids = client(&server).pick_mailboxes(&prompt).await.unwrap();
        assert_eq!(ids, vec![11]);

        let prompt = ScriptedPrompt::default().with_multi_select(vec![]);
        let err = client(&server).pick_mailboxes(&prompt).await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_toggle_reports_flipped_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/aliases/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alias_json(4, "t@sl.co", true)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/aliases/4/toggle"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"enabled": false})))
            .expect(1)
            .mount(&server)
            .await;

        assert!(!client(&server).toggle_alias(4).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_cancelled_makes_no_delete_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/aliases/6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alias_json(6, "d@sl.co", true)))
            .expect(1)
            .mount(&server)
            .await;

        let prompt = ScriptedPrompt::default().with_confirm(false);
        let outcome = client(&server).delete_alias(6, &prompt).await.unwrap();

        assert_eq!(
            outcome,
            DeleteOutcome::Cancelled {
                email: "d@sl.co".to_string()
            }
        );
        assert_eq!(count(&server, "GET").await, 1);
        assert_eq!(count(&server, "DELETE").await, 0);
        assert!(prompt.asked()[0].contains("d@sl.co"));
    }

    #[tokio::test]
    async fn test_delete_confirmed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/aliases/6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alias_json(6, "d@sl.co", true)))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/aliases/6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
            .expect(1)
            .mount(&server)
            .await;

        let prompt = ScriptedPrompt::default().with_confirm(true);
        let outcome = client(&server).delete_alias(6, &prompt).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted { .. }));
    }

    fn domains_json() -> Value {
        json!({
            "custom_domains": [
                {"id": 1, "domain_name": "one.org", "is_verified": true, "catch_all": false,
                 "random_prefix_generation": false, "mailboxes": [], "nb_alias": 0, "creation_timestamp": 1},
                {"id": 2, "domain_name": "two.org", "is_verified": false, "catch_all": true,
                 "random_prefix_generation": true, "mailboxes": [{"id": 1, "email": "me@x.org"}], "nb_alias": 3, "creation_timestamp": 2}
            ]
        })
    }

    #[tokio::test]
    async fn test_domain_info_filters_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/custom_domains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(domains_json()))
            .mount(&server)
            .await;

        let domain = client(&server).domain_info(2).await.unwrap();
        assert_eq!(domain.domain_name, "two.org");

        let err = client(&server).domain_info(99).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_domain_without_fields_makes_no_call() {
        let server = MockServer::start().await;

        let outcome = client(&server)
            .update_domain(1, DomainUpdate::default())
            .await
            .unwrap();

        assert!(matches!(outcome, UpdateOutcome::NoChanges));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_domain_bad_mailbox_list_makes_no_call() {
        let server = MockServer::start().await;

        let update = DomainUpdate {
            catch_all: Some(true),
            mailbox_ids: Some("1,two".to_string()),
            ..Default::default()
        };
        let err = client(&server).update_domain(1, update).await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::InvalidArgument(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_domain_sends_only_given_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/custom_domains/2"))
            .and(body_json(json!({"random_prefix_generation": false, "mailbox_ids": [1, 4]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "custom_domain": {"id": 2, "domain_name": "two.org", "is_verified": true, "catch_all": true,
                 "random_prefix_generation": false, "mailboxes": [], "nb_alias": 3, "creation_timestamp": 2}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let update = DomainUpdate {
            random_prefix_generation: Some(false),
            mailbox_ids: Some("1,4".to_string()),
            ..Default::default()
        };
        let outcome = client(&server).update_domain(2, update).await.unwrap();
        match outcome {
            UpdateOutcome::Updated(domain) => assert!(!domain.random_prefix_generation),
            UpdateOutcome::NoChanges => panic!("expected an update"),
        }
    }

    #[tokio::test]
    async fn test_domain_trash() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/custom_domains/2/trash"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "aliases": [{"alias": "old@two.org", "deletion_timestamp": 1650000000}]
            })))
            .mount(&server)
            .await;

        let trash = client(&server).domain_trash(2).await.unwrap();
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].alias, "old@two.org");
    }

    #[tokio::test]
    async fn test_alias_page_passes_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/aliases"))
            .and(query_param("page_id", "1"))
            .and(query_param("enabled", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"aliases": []})))
            .expect(1)
            .mount(&server)
            .await;

        let page = client(&server).alias_page(1, AliasFilter::Enabled).await.unwrap();
        assert!(page.is_empty());
    }
}
