//! ID-card print dialog.

use dioxus::prelude::*;
use miqat_core::{
    CardDesign, CardPrintJob, CardSize, Company, Orientation, Package, Pilgrim, PrintMode,
    PrintWindowState,
};
use miqat_export::{PageSide, PrintDocumentOptions, paginate, render_job_cards, to_print_document};

use crate::components::IdCard;
use crate::download;
use crate::print_window::{self, PrintWindowError};

/// Props for the [`CardPrintModal`] component.
#[derive(Props, Clone, PartialEq)]
pub struct CardPrintModalProps {
    /// Pilgrims to print, in order.
    pilgrims: Vec<Pilgrim>,
    package: Package,
    company: Company,
    /// Called when the user dismisses the dialog.
    on_close: EventHandler<()>,
}

/// Modal for choosing card options, previewing every card, and printing.
///
/// The Print button is disabled while a job is running.  When printing
/// fails (most often because the popup was blocked) the error is shown
/// and the print document can be downloaded instead.
#[allow(clippy::too_many_lines)]
#[component]
pub fn CardPrintModal(props: CardPrintModalProps) -> Element {
    let mut size = use_signal(CardSize::default);
    let mut orientation = use_signal(Orientation::default);
    let mut design = use_signal(CardDesign::default);
    let mut mode = use_signal(PrintMode::default);
    let mut printing = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut status = use_signal(|| Option::<String>::None);

    let build_job = {
        let pilgrims = props.pilgrims.clone();
        move || {
            let mut job = CardPrintJob::new(pilgrims.clone());
            job.size = size();
            job.orientation = orientation();
            job.design = design().key().to_owned();
            job.print_mode = mode();
            job
        }
    };

    let print_click = {
        let build_job = build_job.clone();
        let package = props.package.clone();
        let company = props.company.clone();
        move |_| {
            let job = build_job();
            if job.is_empty() {
                return;
            }
            let package = package.clone();
            let company = company.clone();
            printing.set(true);
            error.set(None);
            status.set(None);
            spawn(async move {
                let options = PrintDocumentOptions::default();
                match print_window::print_cards(&job, &package, &company, &options).await {
                    Ok(PrintWindowState::Cancelled) => {
                        status.set(Some("Printing cancelled.".into()));
                    }
                    Ok(_) => {
                        status.set(Some(format!("Sent {} pages to the printer.", job.page_count())));
                    }
                    Err(PrintWindowError::Print(e)) => error.set(Some(e.to_string())),
                    Err(e) => error.set(Some(format!("Printing failed: {e}"))),
                }
                printing.set(false);
            });
        }
    };

    let download_click = {
        let package = props.package.clone();
        let company = props.company.clone();
        move |_| {
            let job = build_job();
            let cards = render_job_cards(&job, &package, &company);
            let options = PrintDocumentOptions {
                auto_print: true,
                ..PrintDocumentOptions::default()
            };
            let html = to_print_document(&paginate(&cards, job.print_mode), job.page_size(), &options);
            if let Err(e) = download::trigger_download(&html, "id-cards.html", "text/html") {
                error.set(Some(format!("Download failed: {e}")));
            }
        }
    };

    let count = props.pilgrims.len();
    let pages = count * mode().sides();
    let busy = printing();
    let can_print = count > 0 && !busy;

    let select_class = "w-full rounded border border-slate-300 bg-white px-2 py-1 text-sm";
    let label_class = "block text-xs font-medium text-slate-500 mb-1";
    let primary_class = "px-4 py-2 rounded bg-emerald-600 hover:bg-emerald-700 text-white font-medium disabled:bg-slate-300 disabled:cursor-not-allowed";
    let secondary_class = "px-4 py-2 rounded border border-slate-300 text-slate-700 hover:bg-slate-50";

    rsx! {
        div { class: "fixed inset-0 z-50 flex items-center justify-center bg-black/40 p-4",
            div { class: "bg-white rounded-xl shadow-xl w-full max-w-5xl max-h-[90vh] flex flex-col",
                header { class: "flex items-center justify-between border-b border-slate-200 px-6 py-4",
                    h2 { class: "text-lg font-semibold text-slate-800", "Print ID cards" }
                    button {
                        class: "text-slate-400 hover:text-slate-600 text-xl leading-none",
                        title: "Close",
                        onclick: move |_| props.on_close.call(()),
                        "\u{d7}"
                    }
                }

                div { class: "grid grid-cols-2 md:grid-cols-4 gap-4 px-6 py-4 border-b border-slate-100",
                    div {
                        label { class: label_class, "Card size" }
                        select {
                            class: select_class,
                            value: size().key,
                            onchange: move |evt: FormEvent| size.set(CardSize::from_key(&evt.value())),
                            for s in CardSize::ALL {
                                option { key: "{s.key}", value: s.key, selected: size().key == s.key, "{s.label}" }
                            }
                        }
                    }
                    div {
                        label { class: label_class, "Orientation" }
                        select {
                            class: select_class,
                            onchange: move |evt: FormEvent| {
                                orientation.set(evt.value().parse().unwrap_or_default());
                            },
                            for o in Orientation::ALL {
                                option { key: "{o.key()}", value: o.key(), selected: orientation() == o, "{o.label()}" }
                            }
                        }
                    }
                    div {
                        label { class: label_class, "Design" }
                        select {
                            class: select_class,
                            onchange: move |evt: FormEvent| design.set(CardDesign::from_key(&evt.value())),
                            for d in CardDesign::ALL {
                                option { key: "{d.key()}", value: d.key(), selected: design() == d, "{d}" }
                            }
                        }
                        if let Some(description) = design().description() {
                            p { class: "mt-1 text-xs text-slate-400", "{description.en}" }
                        }
                    }
                    div {
                        label { class: label_class, "Sides" }
                        select {
                            class: select_class,
                            onchange: move |evt: FormEvent| {
                                mode.set(if evt.value() == "double" { PrintMode::Double } else { PrintMode::Single });
                            },
                            option { value: "single", selected: mode() == PrintMode::Single, {PrintMode::Single.label()} }
                            option { value: "double", selected: mode() == PrintMode::Double, {PrintMode::Double.label()} }
                        }
                    }
                }

                div { class: "flex-1 overflow-y-auto px-6 py-4 bg-slate-50",
                    if count == 0 {
                        p { class: "text-sm text-slate-500 italic", "No pilgrims selected." }
                    }
                    div { class: "grid grid-cols-1 md:grid-cols-2 gap-6",
                        for (index , pilgrim) in props.pilgrims.iter().enumerate() {
                            div { key: "{pilgrim.id}", class: "space-y-2",
                                p { class: "text-xs font-medium text-slate-500", "{pilgrim.full_name}" }
                                IdCard {
                                    index,
                                    pilgrim: pilgrim.clone(),
                                    package: props.package.clone(),
                                    company: props.company.clone(),
                                    design: design(),
                                    side: PageSide::Front,
                                    size: size(),
                                    orientation: orientation(),
                                }
                                if mode() == PrintMode::Double {
                                    IdCard {
                                        index,
                                        pilgrim: pilgrim.clone(),
                                        package: props.package.clone(),
                                        company: props.company.clone(),
                                        design: design(),
                                        side: PageSide::Back,
                                        size: size(),
                                        orientation: orientation(),
                                    }
                                }
                            }
                        }
                    }
                }

                footer { class: "flex flex-wrap items-center gap-3 border-t border-slate-200 px-6 py-4",
                    span { class: "text-sm text-slate-500 mr-auto",
                        "{count} cards, {pages} pages"
                    }
                    if let Some(err) = error() {
                        p { class: "text-sm text-red-600 w-full", "{err}" }
                    }
                    if let Some(msg) = status() {
                        p { class: "text-sm text-emerald-700", "{msg}" }
                    }
                    if error().is_some() {
                        button { class: secondary_class, onclick: download_click, "Download HTML" }
                    }
                    button {
                        class: secondary_class,
                        onclick: move |_| props.on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: primary_class,
                        disabled: !can_print,
                        onclick: print_click,
                        if busy { "Printing\u{2026}" } else { "Print" }
                    }
                }
            }
        }
    }
}
