use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use dioxus::prelude::*;
use miqat_core::store::{AuthAction, AuthState, Store, User, reduce_auth};
use miqat_core::{Pilgrim, nationality_breakdown};
use miqat_io::storage::AUTH_STORAGE_KEY;
use miqat_io::{BarChart, CardPrintModal, DonutChart, LineChart, LocalStoragePersistence};

mod demo;

use demo::DemoData;

type AuthStore = Store<AuthState, AuthAction>;

fn main() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("miqat {} starting", env!("CARGO_PKG_VERSION"));
    dioxus::launch(app);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Analytics,
    IdCards,
}

impl Page {
    const ALL: [Self; 2] = [Self::Analytics, Self::IdCards];

    const fn label(self) -> &'static str {
        match self {
            Self::Analytics => "Analytics",
            Self::IdCards => "ID Cards",
        }
    }
}

/// Root application component.
///
/// Owns the auth store (persisted to `localStorage`) and mirrors its
/// state into a signal so the header re-renders on every dispatch.
fn app() -> Element {
    let data = use_hook(|| Rc::new(DemoData::load()));
    let mut page = use_signal(|| Page::Analytics);

    let store = use_hook(|| {
        let store = AuthStore::new(AuthState::default(), reduce_auth)
            .with_persistence(LocalStoragePersistence::new(AUTH_STORAGE_KEY));
        Rc::new(RefCell::new(store))
    });
    let auth = use_signal(|| store.borrow().state().clone());
    use_hook(|| {
        store.borrow_mut().subscribe(move |state: &AuthState| {
            let mut auth = auth;
            auth.set(state.clone());
        })
    });

    let sign_in = {
        let store = Rc::clone(&store);
        move |_| {
            let user = User {
                email: Some("amina@example.com".into()),
                role: Some("Operations".into()),
                ..User::new(1, "Amina Yusuf")
            };
            log::info!("signing in demo user {}", user.name);
            store.borrow_mut().dispatch(AuthAction::LoggedIn {
                user,
                token: "demo-session".into(),
            });
        }
    };
    let sign_out = {
        let store = Rc::clone(&store);
        move |_| {
            log::info!("signing out");
            store.borrow_mut().dispatch(AuthAction::LoggedOut);
        }
    };

    let state = auth();

    rsx! {
        // Utility CSS runtime; the print popup loads the same one.
        script { src: "https://cdn.tailwindcss.com" }
        link { rel: "preconnect", href: "https://fonts.googleapis.com" }
        link { rel: "preconnect", href: "https://fonts.gstatic.com", crossorigin: "anonymous" }
        link {
            rel: "stylesheet",
            href: "https://fonts.googleapis.com/css2?family=Noto+Sans:wght@400;600;700&display=swap",
        }

        div { class: "min-h-screen bg-slate-100 text-slate-800 flex flex-col",
            header { class: "bg-white border-b border-slate-200 px-6 py-3 flex items-center gap-6",
                div {
                    h1 { class: "text-xl font-bold text-emerald-700", "miqat" }
                    p { class: "text-xs text-slate-400", "{data.company.name}" }
                }
                nav { class: "flex gap-1",
                    for p in Page::ALL {
                        button {
                            key: "{p.label()}",
                            class: if page() == p { "px-3 py-1.5 rounded bg-emerald-50 text-emerald-700 font-medium text-sm" } else { "px-3 py-1.5 rounded text-slate-500 hover:bg-slate-50 text-sm" },
                            onclick: move |_| page.set(p),
                            "{p.label()}"
                        }
                    }
                }
                div { class: "ml-auto flex items-center gap-3 text-sm",
                    if let Some(user) = state.user.clone() {
                        span { class: "text-slate-600",
                            "{user.name}"
                            if let Some(role) = user.role {
                                span { class: "ml-1 text-slate-400", "({role})" }
                            }
                        }
                        button {
                            class: "px-3 py-1.5 rounded border border-slate-300 hover:bg-slate-50",
                            onclick: sign_out,
                            "Sign out"
                        }
                    } else {
                        span { class: "text-slate-400", "Not signed in" }
                        button {
                            class: "px-3 py-1.5 rounded bg-emerald-600 hover:bg-emerald-700 text-white",
                            onclick: sign_in,
                            "Sign in (demo)"
                        }
                    }
                }
            }

            main { class: "flex-1 p-6",
                {
                    match page() {
                        Page::Analytics => rsx! { AnalyticsPage { data: Rc::clone(&data) } },
                        Page::IdCards => rsx! { IdCardsPage { data: Rc::clone(&data) } },
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone)]
struct PageProps {
    data: Rc<DemoData>,
}

impl PartialEq for PageProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

#[component]
fn AnalyticsPage(props: PageProps) -> Element {
    let by_nationality = nationality_breakdown(&props.data.pilgrims);

    rsx! {
        div { class: "grid gap-6 md:grid-cols-2 xl:grid-cols-3",
            DonutChart { data: by_nationality, title: "Pilgrims by nationality" }
            LineChart {
                data: props.data.registrations_per_month.clone(),
                title: "Registrations per month",
            }
            BarChart {
                data: props.data.transactions_per_bank.clone(),
                title: "Transactions per bank (SAR)",
            }
        }
    }
}

#[component]
fn IdCardsPage(props: PageProps) -> Element {
    let mut selected = use_signal(BTreeSet::<u64>::new);
    let mut printing = use_signal(|| Option::<Vec<Pilgrim>>::None);

    let all_pilgrims = props.data.pilgrims.clone();
    let print_selected = {
        let all_pilgrims = all_pilgrims.clone();
        move |_| {
            let chosen = selected.read();
            let pilgrims: Vec<Pilgrim> = all_pilgrims
                .iter()
                .filter(|p| chosen.is_empty() || chosen.contains(&p.id))
                .cloned()
                .collect();
            printing.set(Some(pilgrims));
        }
    };

    let selection_count = selected.read().len();
    let button_label = if selection_count == 0 {
        format!("Print all ({})", all_pilgrims.len())
    } else {
        format!("Print selected ({selection_count})")
    };

    rsx! {
        section { class: "bg-white rounded-lg shadow-sm border border-slate-200",
            div { class: "flex items-center justify-between px-4 py-3 border-b border-slate-200",
                div {
                    h2 { class: "font-semibold text-slate-700", "{props.data.package.name}" }
                    p { class: "text-xs text-slate-400", {props.data.package.kind.label()} }
                }
                button {
                    class: "px-4 py-2 rounded bg-emerald-600 hover:bg-emerald-700 text-white text-sm font-medium disabled:bg-slate-300",
                    disabled: all_pilgrims.is_empty(),
                    onclick: print_selected,
                    "{button_label}"
                }
            }
            table { class: "w-full text-sm",
                thead { class: "text-left text-xs uppercase text-slate-400",
                    tr {
                        th { class: "px-4 py-2 w-8" }
                        th { class: "px-4 py-2", "Name" }
                        th { class: "px-4 py-2", "Passport" }
                        th { class: "px-4 py-2", "Nationality" }
                        th { class: "px-4 py-2", "Registration" }
                    }
                }
                tbody {
                    for pilgrim in all_pilgrims.iter() {
                        PilgrimRow {
                            key: "{pilgrim.id}",
                            pilgrim: pilgrim.clone(),
                            checked: selected.read().contains(&pilgrim.id),
                            on_toggle: move |id: u64| {
                                let mut set = selected.write();
                                if !set.remove(&id) {
                                    set.insert(id);
                                }
                            },
                        }
                    }
                }
            }
        }

        if let Some(pilgrims) = printing() {
            CardPrintModal {
                pilgrims,
                package: props.data.package.clone(),
                company: props.data.company.clone(),
                on_close: move |()| printing.set(None),
            }
        }
    }
}

#[component]
fn PilgrimRow(pilgrim: Pilgrim, checked: bool, on_toggle: EventHandler<u64>) -> Element {
    let id = pilgrim.id;
    let passport = pilgrim.passport_number.unwrap_or_default();
    let nationality = pilgrim.nationality.unwrap_or_default();
    let registration = pilgrim.registration_number.unwrap_or_default();

    rsx! {
        tr { class: "border-t border-slate-100 hover:bg-slate-50",
            td { class: "px-4 py-2",
                input {
                    r#type: "checkbox",
                    checked,
                    onchange: move |_| on_toggle.call(id),
                }
            }
            td { class: "px-4 py-2 font-medium", "{pilgrim.full_name}" }
            td { class: "px-4 py-2 font-mono text-xs", "{passport}" }
            td { class: "px-4 py-2", "{nationality}" }
            td { class: "px-4 py-2 text-slate-500", "{registration}" }
        }
    }
}
