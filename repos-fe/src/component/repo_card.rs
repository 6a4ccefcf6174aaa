use js_sys::{Date, Object, Reflect};
use time::OffsetDateTime;
use wasm_bindgen::JsValue;
use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct RepoCardProps {
    pub name: AttrValue,
    pub url: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    /// Empty when the repository has no primary language.
    #[prop_or_default]
    pub language: AttrValue,
    pub stars: u32,
    pub updated: OffsetDateTime,
    #[prop_or_default]
    pub topics: Vec<AttrValue>,
    #[prop_or(true)]
    pub visible: bool,
}

#[function_component]
pub fn RepoCard(props: &RepoCardProps) -> Html {
    let style = if props.visible {
        "margin-bottom: 1em;"
    } else {
        "margin-bottom: 1em; display: none;"
    };

    html! {
        <div class="card" data-language={props.language.clone()} style={style}>
            <div class="card-body">
                <h5 class="card-title">
                    <a href={props.url.clone()} target="_blank">{props.name.clone()}</a>
                </h5>
                {
                    if let Some(description) = &props.description {
                        html! { <p class="card-text">{description.clone()}</p> }
                    } else {
                        html! {}
                    }
                }
                <p class="card-text text-muted">
                    {
                        if !props.language.is_empty() {
                            html! {
                                <span style="margin-right: 1em;">
                                    <i class="bi bi-wrench"></i> {" "} {props.language.clone()}
                                </span>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <span style="margin-right: 1em;">
                        <i class="bi bi-star"></i> {" "} {props.stars}
                    </span>
                    <span>
                        <i class="bi bi-clock"></i> {" "} {format_updated(&props.updated)}
                    </span>
                </p>
                <p class="card-text">
                    {props.topics.iter().map(|topic| html! {
                        <span class="badge bg-secondary" style="margin-right: 0.5em;">{topic.clone()}</span>
                    }).collect::<Html>()}
                </p>
            </div>
        </div>
    }
}

/// Formats the last-updated date in the viewer's locale, short month name.
fn format_updated(updated: &OffsetDateTime) -> String {
    let millis = (updated.unix_timestamp_nanos() / 1_000_000) as f64;
    let date = Date::new(&JsValue::from_f64(millis));

    let options = Object::new();
    for (key, value) in [("year", "numeric"), ("month", "short"), ("day", "numeric")] {
        if let Err(e) = Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value)) {
            log::error!("set date format option error: {e:?}");
        }
    }

    date.to_locale_date_string("default", &options).into()
}

#[function_component]
pub fn RepoCardPlaceholder() -> Html {
    html! {
        <div class="card" style="margin-bottom: 1em;">
            <div class="card-body">
                <h5 class="placeholder-glow">
                    <span class="placeholder col-4"></span>
                </h5>
                <p class="card-text placeholder-glow">
                    <span class="placeholder col-7"></span>
                    <span class="placeholder col-5"></span>
                </p>
                <p class="card-text placeholder-glow">
                    <span class="placeholder col-2"></span>
                    {" "}
                    <span class="placeholder col-1"></span>
                    {" "}
                    <span class="placeholder col-2"></span>
                </p>
            </div>
        </div>
    }
}
