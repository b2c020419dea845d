use dioxus::prelude::*;
use ui::components::forms::{LoginForm, RegisterForm, UploadForm};
use ui::{use_auth, AuthProvider};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/upload")]
    Upload {},
}

/// Authenticated home view. Unauthenticated visitors are sent to the login
/// route once the session state has finished loading.
#[component]
fn Home() -> Element {
    let auth = use_auth();
    let state = auth.state;
    let nav = navigator();

    use_effect(move || {
        let current = state.read();
        if !current.loading && !current.signed_in() {
            nav.replace(Route::Login {});
        }
    });

    let current = state.read();
    if current.loading {
        return rsx! {
            div {
                class: "page-container",
                p { "Loading..." }
            }
        };
    }
    if !current.signed_in() {
        return rsx! { div {} };
    }

    let username = current
        .profile
        .as_ref()
        .map(|p| p.username.clone())
        .unwrap_or_default();

    rsx! {
        div {
            class: "page-container",
            h2 { "Hi, {username} 👋" }
            p {
                Link { to: Route::Upload {}, "Upload a video" }
            }
            button {
                class: "auth-button",
                onclick: move |_| auth.sign_out(),
                "Sign out"
            }
        }
    }
}

#[component]
fn Login() -> Element {
    let nav = navigator();
    rsx! {
        div {
            class: "page-container",
            LoginForm {
                on_success: move |_| { nav.push(Route::Home {}); }
            }
            p {
                class: "auth-footer",
                "No account yet? "
                Link { to: Route::Register {}, "Sign up!" }
            }
        }
    }
}

#[component]
fn Register() -> Element {
    let nav = navigator();
    rsx! {
        div {
            class: "page-container",
            RegisterForm {
                on_success: move |_| { nav.push(Route::Home {}); }
            }
            p {
                class: "auth-footer",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}

#[component]
fn Upload() -> Element {
    let nav = navigator();
    rsx! {
        div {
            class: "page-container",
            UploadForm {
                on_success: move |_| { nav.push(Route::Home {}); }
            }
        }
    }
}
