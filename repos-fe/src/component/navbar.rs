use yew::prelude::*;
use yew_router::prelude::*;

const NAV_TITLE: &str = "Repo Explorer";

#[derive(PartialEq, Properties)]
pub struct NavBarProps {
    pub active: &'static str,
}

#[function_component]
pub fn NavBar(props: &NavBarProps) -> Html {
    let repos_class = if props.active == "repos" {
        classes!("nav-link", "active")
    } else {
        classes!("nav-link")
    };

    html! {
        <nav class="navbar navbar-expand-lg navbar-dark bg-primary" style="margin-bottom: 1em;">
            <div class="container-fluid">
                <Link<crate::Route> classes={classes!("navbar-brand")} to={crate::Route::Home}>{NAV_TITLE}</Link<crate::Route>>
                <div class="collapse navbar-collapse show">
                    <ul class="navbar-nav">
                        <li class="nav-item">
                            <Link<crate::Route> classes={repos_class} to={crate::Route::Home}>{"Repositories"}</Link<crate::Route>>
                        </li>
                    </ul>
                </div>
            </div>
        </nav>
    }
}
