use anyhow::*;
use web_sys::window;
use yew::prelude::*;

const APP_NAME: &str = "Repo Explorer";

#[derive(PartialEq, Properties)]
pub struct TitleProps {
    pub title: AttrValue,
}

/// Renders nothing; sets the document title to "<page> · Repo Explorer" as a
/// side effect.
#[function_component]
pub fn Title(props: &TitleProps) -> Html {
    if let Err(e) = set_title(&props.title) {
        log::error!("set title error: {e}");
    }

    html! {
        <></>
    }
}

fn set_title(title: &AttrValue) -> Result<(), Error> {
    window()
        .ok_or(anyhow!("window not found"))?
        .document()
        .ok_or(anyhow!("document not found"))?
        .set_title(&format!("{title} · {APP_NAME}"));
    Ok(())
}
