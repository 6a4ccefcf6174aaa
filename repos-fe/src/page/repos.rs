use anyhow::{anyhow, Result};
use futures_util::future::join_all;
use log::{error, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::{html::Scope, prelude::*};

use crate::{
    component::*,
    config::WidgetConfig,
    model::github::{Repo, TopicsResponse},
};

const PER_PAGE: usize = 100;

const ALL_LANGUAGES: &str = "all";

pub struct RepoExplorerPage {
    user: String,
    state: LoadState,
    languages: Vec<String>,
    selected: String,
}

enum LoadState {
    Loading,
    Failed {
        err: String,
    },
    Ready {
        repos: Vec<Repo>,
        // topics for repos[i] live at topics[i]
        topics: Vec<Vec<String>>,
    },
}

pub enum RepoExplorerPageMsg {
    Loaded {
        repos: Vec<Repo>,
        topics: Vec<Vec<String>>,
    },
    Failed {
        err: String,
    },
    SelectLanguage {
        language: String,
    },
}

impl RepoExplorerPage {
    /// Fetches the listing and all topics, then reports back with a single
    /// message. Topics requests run concurrently once the listing is complete;
    /// a listing failure aborts the whole load.
    fn load(user: String, link: Scope<Self>) {
        wasm_bindgen_futures::spawn_local(async move {
            let repos = match Self::load_repos_imp(&user).await {
                Ok(repos) => repos,
                Err(err) => {
                    error!("load repositories error: {err}");
                    link.send_message(RepoExplorerPageMsg::Failed {
                        err: err.to_string(),
                    });
                    return;
                }
            };

            let topics = join_all(
                repos
                    .iter()
                    .map(|repo| Self::load_topics(&user, &repo.name)),
            )
            .await;

            link.send_message(RepoExplorerPageMsg::Loaded { repos, topics });
        });
    }

    async fn load_repos_imp(user: &str) -> Result<Vec<Repo>> {
        let mut pages = PageAccumulator::new();
        loop {
            let page = pages.next_page();
            let batch: Vec<Repo> =
                gloo_net::http::Request::get(&format!("https://api.github.com/users/{user}/repos"))
                    .query([
                        ("per_page", PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ])
                    .send()
                    .await?
                    .json()
                    .await?;

            if !pages.absorb(batch) {
                break;
            }
        }
        Ok(pages.into_items())
    }

    async fn load_topics(user: &str, repo: &str) -> Vec<String> {
        topics_or_empty(Self::load_topics_imp(user, repo).await)
    }

    async fn load_topics_imp(user: &str, repo: &str) -> Result<Vec<String>> {
        let resp =
            gloo_net::http::Request::get(&format!("https://api.github.com/repos/{user}/{repo}/topics"))
                .header("Accept", "application/vnd.github.mercy-preview+json")
                .send()
                .await?;

        check_topics_response(repo, resp.ok(), resp.status())?;

        let topics: TopicsResponse = resp.json().await?;
        Ok(topics.names)
    }
}

impl Component for RepoExplorerPage {
    type Message = RepoExplorerPageMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = WidgetConfig::load_from_localstorage();
        Self::load(config.user.clone(), ctx.link().clone());

        Self {
            user: config.user,
            state: LoadState::Loading,
            languages: Vec::new(),
            selected: ALL_LANGUAGES.to_string(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            RepoExplorerPageMsg::Loaded { repos, topics } => {
                self.languages = collect_languages(&repos);
                self.state = LoadState::Ready { repos, topics };
                true
            }
            RepoExplorerPageMsg::Failed { err } => {
                self.state = LoadState::Failed { err };
                true
            }
            RepoExplorerPageMsg::SelectLanguage { language } => {
                self.selected = language;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_change_language = {
            let link = ctx.link().clone();
            Callback::from(move |e: Event| {
                let select = e
                    .target()
                    .expect("event target should be exists")
                    .dyn_into::<HtmlSelectElement>()
                    .expect("filter should be a select element");
                link.send_message(RepoExplorerPageMsg::SelectLanguage {
                    language: select.value(),
                });
            })
        };

        html! {
            <>
                <Title title="Repositories" />
                <NavBar active="repos" />
                <div class="container-sm" style="padding-top: 1em; padding-bottom: 1em;">
                    <h3>{format!("Public repositories of {}", self.user)}</h3>

                    <div class="row mb-3">
                        <label for="language-filter" class="col-sm-3 col-form-label">
                            {"Filter by language"}
                        </label>
                        <div class="col-sm-4">
                            <select class="form-select" id="language-filter" onchange={on_change_language}>
                                <option value={ALL_LANGUAGES} selected={self.selected == ALL_LANGUAGES}>
                                    {"All languages"}
                                </option>
                                {
                                    self.languages.iter().map(|language| html! {
                                        <option value={language.clone()} selected={*language == self.selected}>
                                            {language.clone()}
                                        </option>
                                    }).collect::<Html>()
                                }
                            </select>
                        </div>
                    </div>

                    {
                        match &self.state {
                            LoadState::Loading => (0..4).map(|_| html! {
                                <RepoCardPlaceholder />
                            }).collect::<Html>(),
                            LoadState::Failed { err } => html! {
                                <div class="alert alert-danger" role="alert">
                                    {"Failed to load repositories: "} {err.clone()}
                                </div>
                            },
                            LoadState::Ready { repos, topics } => {
                                repos.iter().zip(topics.iter()).map(|(repo, topics)| {
                                    let language = repo.language.clone().unwrap_or_default();
                                    html! {
                                        <RepoCard
                                            name={repo.name.clone()}
                                            url={repo.html_url.clone()}
                                            description={repo.description.clone().map(AttrValue::from)}
                                            language={language.clone()}
                                            stars={repo.stargazers_count}
                                            updated={repo.updated_at}
                                            topics={topics.iter().cloned().map(AttrValue::from).collect::<Vec<_>>()}
                                            visible={card_visible(&self.selected, &language)} />
                                    }
                                }).collect::<Html>()
                            }
                        }
                    }
                </div>
            </>
        }
    }
}

/// Drives pagination: hands out increasing page numbers and decides, from the
/// size of each received page, whether another request is needed.
struct PageAccumulator<T> {
    items: Vec<T>,
    next_page: u32,
}

impl<T> PageAccumulator<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
        }
    }

    fn next_page(&mut self) -> u32 {
        let page = self.next_page;
        self.next_page += 1;
        page
    }

    /// Absorbs one page of results. Returns whether the caller should request
    /// another page: only a full page may be followed by more.
    fn absorb(&mut self, page: Vec<T>) -> bool {
        let full = page.len() == PER_PAGE;
        self.items.extend(page);
        full
    }

    fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// A non-success topics response is an error, to be absorbed by the caller.
fn check_topics_response(repo: &str, ok: bool, status: u16) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(anyhow!("topics request for {repo} failed with status {status}"))
    }
}

/// A failed topics fetch degrades to an empty list for that repository only.
fn topics_or_empty(result: Result<Vec<String>>) -> Vec<String> {
    match result {
        Ok(names) => names,
        Err(err) => {
            warn!("load topics error: {err}");
            Vec::new()
        }
    }
}

/// Distinct non-empty language values across all fetched repositories, sorted
/// for the filter dropdown. Case-insensitive with a byte tiebreak, so
/// lowercase-initial labels like "jq" interleave with uppercase ones the way
/// a locale collation orders them.
fn collect_languages(repos: &[Repo]) -> Vec<String> {
    let mut languages: Vec<String> = repos
        .iter()
        .filter_map(|repo| repo.language.as_deref())
        .filter(|language| !language.is_empty())
        .map(str::to_string)
        .collect();
    languages.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    languages.dedup();
    languages
}

/// Exact, case-sensitive match against the stored language attribute;
/// the fixed "all" option matches every card.
fn card_visible(selected: &str, language: &str) -> bool {
    selected == ALL_LANGUAGES || selected == language
}

#[cfg(test)]
mod test {
    use time::OffsetDateTime;

    use super::*;

    fn repo(name: &str, language: Option<&str>) -> Repo {
        Repo {
            name: name.to_string(),
            description: None,
            language: language.map(str::to_string),
            stargazers_count: 0,
            updated_at: OffsetDateTime::UNIX_EPOCH,
            html_url: format!("https://github.com/someone/{name}"),
        }
    }

    fn run_pagination(page_sizes: &[usize]) -> (u32, usize) {
        let mut pages = PageAccumulator::new();
        let mut requests = 0;
        loop {
            let page = pages.next_page();
            requests += 1;
            assert_eq!(page, requests);

            let size = page_sizes[(requests - 1) as usize];
            if !pages.absorb(vec![(); size]) {
                break;
            }
        }
        (requests, pages.into_items().len())
    }

    #[test]
    fn pagination_stops_one_page_after_first_short_page() {
        let (requests, total) = run_pagination(&[100, 100, 37]);
        assert_eq!(requests, 3);
        assert_eq!(total, 237);
    }

    #[test]
    fn pagination_handles_empty_first_page() {
        let (requests, total) = run_pagination(&[0]);
        assert_eq!(requests, 1);
        assert_eq!(total, 0);
    }

    #[test]
    fn pagination_requests_one_more_page_after_exact_multiple() {
        let (requests, total) = run_pagination(&[100, 0]);
        assert_eq!(requests, 2);
        assert_eq!(total, 100);
    }

    #[test]
    fn collect_languages_dedups_and_sorts() {
        let repos = vec![
            repo("a", Some("Rust")),
            repo("b", Some("Go")),
            repo("c", None),
            repo("d", Some("Go")),
            repo("e", Some("JavaScript")),
        ];

        assert_eq!(collect_languages(&repos), vec!["Go", "JavaScript", "Rust"]);
    }

    #[test]
    fn collect_languages_interleaves_case_like_a_locale_sort() {
        let repos = vec![
            repo("a", Some("jq")),
            repo("b", Some("Rust")),
            repo("c", Some("nesC")),
            repo("d", Some("Go")),
            repo("e", Some("xBase")),
        ];

        assert_eq!(
            collect_languages(&repos),
            vec!["Go", "jq", "nesC", "Rust", "xBase"]
        );
    }

    #[test]
    fn collect_languages_skips_empty_values() {
        let repos = vec![repo("a", Some("")), repo("b", None)];
        assert!(collect_languages(&repos).is_empty());
    }

    #[test]
    fn non_success_topics_status_is_an_error() {
        assert!(check_topics_response("widget", false, 404).is_err());
        assert!(check_topics_response("widget", false, 403).is_err());
        assert!(check_topics_response("widget", true, 200).is_ok());
    }

    #[test]
    fn topics_failure_degrades_to_empty_list() {
        let names = topics_or_empty(
            check_topics_response("widget", false, 404).map(|_| vec!["wasm".to_string()]),
        );
        assert!(names.is_empty());

        assert_eq!(
            topics_or_empty(Ok(vec!["wasm".to_string()])),
            vec!["wasm"]
        );
    }

    #[test]
    fn card_visible_is_exact_and_case_sensitive() {
        assert!(card_visible("Go", "Go"));
        assert!(!card_visible("go", "Go"));
        assert!(!card_visible("Rust", "Go"));
        assert!(!card_visible("Go", ""));
    }

    #[test]
    fn all_matches_every_card() {
        assert!(card_visible(ALL_LANGUAGES, "Go"));
        assert!(card_visible(ALL_LANGUAGES, ""));
    }

    #[test]
    fn filter_round_trip_over_one_repo() {
        let repos = vec![repo("a", Some("Go"))];

        let visible = |selected: &str| -> Vec<bool> {
            repos
                .iter()
                .map(|repo| card_visible(selected, repo.language.as_deref().unwrap_or("")))
                .collect()
        };

        assert_eq!(visible("Go"), vec![true]);
        assert_eq!(visible("Rust"), vec![false]);
        assert_eq!(visible(ALL_LANGUAGES), vec![true]);
    }
}
