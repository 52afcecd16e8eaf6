//! Browser print flow for ID cards.
//!
//! Printing happens in a popup window holding a standalone document
//! built by [`miqat_export::to_print_document`], so the app's own page
//! styles and layout never leak into the printout.  The popup is driven
//! through [`PrintWindowState`]:
//!
//! 1. [`OpenedWindow::open`] opens a blank popup.  A blocked popup is
//!    reported with a blocking alert and [`PrintError::PopupBlocked`];
//!    nothing is written and nothing is retried.
//! 2. [`OpenedWindow::write`] writes the document, consuming the handle.
//! 3. The host waits the configured delay for images and styles.
//! 4. [`WrittenWindow::finish`] shows the print dialog, or reports
//!    `Cancelled` if the user already closed the popup.  The popup is
//!    closed either way.
//!
//! The delay and the dialog are driven from here rather than by an
//! inline script in the popup, so the outcome can be observed.  The
//! document still carries an `afterprint` handler that closes the popup
//! on its own, for when this future is dropped mid-flight.
//!
//! `window.print()` blocks until the dialog is dismissed and does not
//! say whether the user printed, so "dialog returned" is reported as
//! [`PrintWindowState::Printed`].
//!
//! The browser side sits behind [`PrintHost`] and [`PrintPopup`], both
//! implemented for [`web_sys::Window`].  [`print_cards`] needs a browser
//! environment (`wasm32-unknown-unknown` target); [`print_with`] runs the
//! same flow against any host.

use std::future::Future;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use miqat_core::print::PrintEvent;
use miqat_core::types::{back_element_id, front_element_id};
use miqat_core::{CardContext, CardPrintJob, Company, Package, PrintError, PrintWindowState};
use miqat_export::{CardMarkup, CardRenderer, PrintDocumentOptions, paginate, to_print_document};

/// Window features for the print popup.
pub const POPUP_FEATURES: &str = "width=900,height=700";

/// Errors from the browser print flow.
#[derive(Debug, thiserror::Error)]
pub enum PrintWindowError {
    #[error(transparent)]
    Print(#[from] PrintError),

    /// A browser API call returned an error or a required object was
    /// missing.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for PrintWindowError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Lookup of card markup already rendered on screen.
pub trait CardMarkupSource {
    /// Outer HTML of the element with `id`, if it exists.
    fn card_outer_html(&self, id: &str) -> Option<String>;
}

/// The page that opens the print popup.
pub trait PrintHost: CardMarkupSource {
    type Popup: PrintPopup;

    /// Open a blank popup.  `Ok(None)` means the browser blocked it.
    ///
    /// # Errors
    ///
    /// Returns [`PrintWindowError::JsError`] if the browser call fails.
    fn open_popup(&self) -> Result<Option<Self::Popup>, PrintWindowError>;

    /// Show a blocking message to the user.
    fn alert_user(&self, message: &str);

    /// Resolve after `delay_ms` milliseconds.
    fn wait(&self, delay_ms: u32) -> impl Future<Output = ()>;
}

/// An open print popup.
pub trait PrintPopup {
    /// Replace the popup's document with `html`.
    ///
    /// # Errors
    ///
    /// Returns [`PrintWindowError::JsError`] if writing fails.
    fn write_document(&self, html: &str) -> Result<(), PrintWindowError>;

    /// Whether the user has closed the popup.
    ///
    /// # Errors
    ///
    /// Returns [`PrintWindowError::JsError`] if the browser call fails.
    fn is_closed(&self) -> Result<bool, PrintWindowError>;

    /// Show the print dialog and return once it is dismissed.
    ///
    /// # Errors
    ///
    /// Returns [`PrintWindowError::JsError`] if the browser call fails.
    fn show_print_dialog(&self) -> Result<(), PrintWindowError>;

    /// Close the popup.  Failures are ignored.
    fn close_popup(&self);
}

impl CardMarkupSource for Window {
    fn card_outer_html(&self, id: &str) -> Option<String> {
        self.document()?
            .get_element_by_id(id)
            .map(|el| el.outer_html())
    }
}

impl PrintHost for Window {
    type Popup = Self;

    fn open_popup(&self) -> Result<Option<Self>, PrintWindowError> {
        Ok(self.open_with_url_and_target_and_features("", "_blank", POPUP_FEATURES)?)
    }

    fn alert_user(&self, message: &str) {
        let _ = self.alert_with_message(message);
    }

    fn wait(&self, delay_ms: u32) -> impl Future<Output = ()> {
        TimeoutFuture::new(delay_ms)
    }
}

impl PrintPopup for Window {
    fn write_document(&self, html: &str) -> Result<(), PrintWindowError> {
        let document = self
            .document()
            .ok_or_else(|| PrintWindowError::JsError("print window has no document".into()))?;
        let document = document.unchecked_ref::<web_sys::HtmlDocument>();
        document.open()?;
        document.write(&js_sys::Array::of1(&JsValue::from_str(html)))?;
        document.close()?;
        Ok(())
    }

    fn is_closed(&self) -> Result<bool, PrintWindowError> {
        Ok(self.closed()?)
    }

    fn show_print_dialog(&self) -> Result<(), PrintWindowError> {
        let _ = self.focus();
        self.print()?;
        Ok(())
    }

    fn close_popup(&self) {
        let _ = self.close();
    }
}

/// Collect the markup of every card in `job`.
///
/// Cards already on screen (the print preview) are read back by element
/// id so the printout matches the preview exactly.  Any side that is not
/// on screen is rendered from data with the job's design.
#[must_use]
pub fn capture_card_markup<S: CardMarkupSource + ?Sized>(
    source: &S,
    job: &CardPrintJob,
    package: &Package,
    company: &Company,
) -> Vec<CardMarkup> {
    let design = job.design();
    let mut rerendered = 0_usize;
    let cards = job
        .pilgrims
        .iter()
        .enumerate()
        .map(|(index, pilgrim)| {
            let ctx = CardContext::new(index, pilgrim, package, company);
            let front = source
                .card_outer_html(&front_element_id(index))
                .unwrap_or_else(|| {
                    rerendered += 1;
                    design.render_front(&ctx)
                });
            let back = source
                .card_outer_html(&back_element_id(index))
                .unwrap_or_else(|| {
                    rerendered += 1;
                    design.render_back(&ctx)
                });
            CardMarkup { front, back }
        })
        .collect();
    if rerendered > 0 {
        log::debug!("{rerendered} card sides were not on screen; rendered from data");
    }
    cards
}

/// Print the cards of `job` through a popup of the current window.
///
/// # Errors
///
/// See [`print_with`].  Also returns [`PrintWindowError::JsError`] when
/// there is no global window.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Window is !Send
pub async fn print_cards(
    job: &CardPrintJob,
    package: &Package,
    company: &Company,
    options: &PrintDocumentOptions,
) -> Result<PrintWindowState, PrintWindowError> {
    let host = web_sys::window().ok_or_else(|| PrintWindowError::JsError("no global window".into()))?;
    print_with(&host, job, package, company, options).await
}

/// Print the cards of `job` through a popup opened by `host`.
///
/// Returns the outcome of the dialog stage: [`PrintWindowState::Printed`]
/// or [`PrintWindowState::Cancelled`].  `options.auto_print` is ignored;
/// this function drives the dialog itself.
///
/// # Errors
///
/// Returns [`PrintError::EmptyJob`] for a job without pilgrims and
/// [`PrintError::PopupBlocked`] when the popup is blocked, both wrapped
/// and both before anything is written.  Returns
/// [`PrintWindowError::JsError`] when a browser call fails; the popup is
/// closed on every error after it was opened.
#[allow(clippy::future_not_send)]
pub async fn print_with<H: PrintHost>(
    host: &H,
    job: &CardPrintJob,
    package: &Package,
    company: &Company,
    options: &PrintDocumentOptions,
) -> Result<PrintWindowState, PrintWindowError> {
    if job.is_empty() {
        return Err(PrintError::EmptyJob.into());
    }

    let cards = capture_card_markup(host, job, package, company);
    let pages = paginate(&cards, job.print_mode);
    let document_options = PrintDocumentOptions {
        auto_print: false,
        ..options.clone()
    };
    let html = to_print_document(&pages, job.page_size(), &document_options);

    let popup = OpenedWindow::open(host)?;
    log::info!(
        "print window opened: {} pages at {}x{} mm",
        pages.len(),
        job.page_size().width_mm,
        job.page_size().height_mm
    );
    let written = popup.write(&html)?;
    host.wait(options.print_delay_ms).await;
    let outcome = written.finish()?;
    log::info!("print job finished: {outcome:?}");
    Ok(outcome)
}

/// A freshly opened, still blank print popup.
#[derive(Debug)]
pub struct OpenedWindow<P> {
    popup: P,
    state: PrintWindowState,
}

impl<P: PrintPopup> OpenedWindow<P> {
    /// Open a blank popup from `host`.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::PopupBlocked`] (after alerting the user) when
    /// the browser refuses to open the window.
    pub fn open<H: PrintHost<Popup = P>>(host: &H) -> Result<Self, PrintWindowError> {
        match host.open_popup()? {
            Some(popup) => Ok(Self {
                popup,
                state: PrintWindowState::Opened,
            }),
            None => {
                let err = PrintError::PopupBlocked;
                log::warn!("print window blocked by the browser");
                host.alert_user(&err.to_string());
                Err(err.into())
            }
        }
    }

    /// Replace the popup's document with `html`.
    ///
    /// # Errors
    ///
    /// Returns [`PrintWindowError::JsError`] if writing fails.  The popup
    /// is closed before returning an error.
    pub fn write(self, html: &str) -> Result<WrittenWindow<P>, PrintWindowError> {
        let result = self
            .popup
            .write_document(html)
            .and_then(|()| self.state.advance(PrintEvent::DocumentWritten).map_err(Into::into));
        match result {
            Ok(state) => Ok(WrittenWindow {
                popup: self.popup,
                state,
            }),
            Err(e) => {
                self.popup.close_popup();
                Err(e)
            }
        }
    }
}

/// A print popup holding the print document.
#[derive(Debug)]
pub struct WrittenWindow<P> {
    popup: P,
    state: PrintWindowState,
}

impl<P: PrintPopup> WrittenWindow<P> {
    /// Show the print dialog, then close the popup.
    ///
    /// # Errors
    ///
    /// Returns [`PrintWindowError::JsError`] if a browser call fails.
    pub fn finish(self) -> Result<PrintWindowState, PrintWindowError> {
        let outcome = self.show_dialog();
        self.popup.close_popup();
        let outcome = outcome?;
        outcome.advance(PrintEvent::Closed)?;
        Ok(outcome)
    }

    fn show_dialog(&self) -> Result<PrintWindowState, PrintWindowError> {
        if self.popup.is_closed()? {
            log::info!("print window closed before the dialog opened");
            return Ok(self.state.advance(PrintEvent::Cancelled)?);
        }
        let shown = self.state.advance(PrintEvent::DialogShown)?;
        self.popup.show_print_dialog()?;
        Ok(shown.advance(PrintEvent::DialogFinished)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use futures::executor::block_on;
    use miqat_core::{Pilgrim, PrintMode};

    use super::*;

    /// What the fake browser does and what it was asked to do.
    #[derive(Default)]
    struct Browser {
        calls: RefCell<Vec<String>>,
        written: RefCell<Option<String>>,
        blocked: bool,
        closed_by_user: bool,
        write_fails: bool,
        print_fails: bool,
    }

    impl Browser {
        fn record(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    struct FakeHost {
        browser: Rc<Browser>,
        on_screen: HashMap<String, String>,
    }

    struct FakePopup {
        browser: Rc<Browser>,
    }

    impl CardMarkupSource for FakeHost {
        fn card_outer_html(&self, id: &str) -> Option<String> {
            self.browser.record(format!("read {id}"));
            self.on_screen.get(id).cloned()
        }
    }

    impl PrintHost for FakeHost {
        type Popup = FakePopup;

        fn open_popup(&self) -> Result<Option<FakePopup>, PrintWindowError> {
            self.browser.record("open");
            Ok((!self.browser.blocked).then(|| FakePopup {
                browser: Rc::clone(&self.browser),
            }))
        }

        fn alert_user(&self, message: &str) {
            self.browser.record(format!("alert {message}"));
        }

        fn wait(&self, delay_ms: u32) -> impl Future<Output = ()> {
            self.browser.record(format!("wait {delay_ms}"));
            std::future::ready(())
        }
    }

    impl PrintPopup for FakePopup {
        fn write_document(&self, html: &str) -> Result<(), PrintWindowError> {
            self.browser.record("write");
            if self.browser.write_fails {
                return Err(PrintWindowError::JsError("document.write failed".into()));
            }
            *self.browser.written.borrow_mut() = Some(html.to_owned());
            Ok(())
        }

        fn is_closed(&self) -> Result<bool, PrintWindowError> {
            self.browser.record("closed?");
            Ok(self.browser.closed_by_user)
        }

        fn show_print_dialog(&self) -> Result<(), PrintWindowError> {
            self.browser.record("print");
            if self.browser.print_fails {
                return Err(PrintWindowError::JsError("print failed".into()));
            }
            Ok(())
        }

        fn close_popup(&self) {
            self.browser.record("close");
        }
    }

    fn host(browser: Browser) -> (FakeHost, Rc<Browser>) {
        let browser = Rc::new(browser);
        let host = FakeHost {
            browser: Rc::clone(&browser),
            on_screen: HashMap::new(),
        };
        (host, browser)
    }

    fn job(n: u64) -> CardPrintJob {
        CardPrintJob::new((0..n).map(|i| Pilgrim::new(i, format!("Pilgrim {i}"))).collect())
    }

    fn run(host: &FakeHost, job: &CardPrintJob) -> Result<PrintWindowState, PrintWindowError> {
        block_on(print_with(
            host,
            job,
            &Package::default(),
            &Company::default(),
            &PrintDocumentOptions::default(),
        ))
    }

    #[test]
    fn flow_runs_capture_open_write_wait_print_close_in_order() {
        let (host, browser) = host(Browser::default());
        let outcome = run(&host, &job(1)).unwrap();
        assert_eq!(outcome, PrintWindowState::Printed);
        assert_eq!(
            browser.calls(),
            [
                "read id-card-front-0",
                "read id-card-back-0",
                "open",
                "write",
                "wait 500",
                "closed?",
                "print",
                "close",
            ]
        );
    }

    #[test]
    fn written_document_leaves_printing_to_the_host() {
        let (host, browser) = host(Browser::default());
        run(&host, &job(2)).unwrap();
        let html = browser.written.borrow().clone().unwrap();
        assert_eq!(html.matches("<div class=\"card-page\"").count(), 2);
        assert!(!html.contains("window.print()"));
        assert!(html.contains("afterprint"));
    }

    #[test]
    fn blocked_popup_alerts_and_writes_nothing() {
        let (host, browser) = host(Browser {
            blocked: true,
            ..Browser::default()
        });
        let err = run(&host, &job(1)).unwrap_err();
        assert!(matches!(err, PrintWindowError::Print(PrintError::PopupBlocked)));

        let calls = browser.calls();
        assert_eq!(calls[2], "open");
        assert!(calls[3].starts_with("alert ") && calls[3].contains("allow pop-ups"));
        assert_eq!(calls.len(), 4);
        assert!(browser.written.borrow().is_none());
    }

    #[test]
    fn popup_closed_during_delay_is_cancelled() {
        let (host, browser) = host(Browser {
            closed_by_user: true,
            ..Browser::default()
        });
        let outcome = run(&host, &job(1)).unwrap();
        assert_eq!(outcome, PrintWindowState::Cancelled);
        let calls = browser.calls();
        assert!(!calls.iter().any(|c| c == "print"));
        assert_eq!(calls.last().map(String::as_str), Some("close"));
    }

    #[test]
    fn failed_write_closes_popup_without_waiting() {
        let (host, browser) = host(Browser {
            write_fails: true,
            ..Browser::default()
        });
        let err = run(&host, &job(1)).unwrap_err();
        assert!(matches!(err, PrintWindowError::JsError(_)));
        let calls = browser.calls();
        assert_eq!(&calls[calls.len() - 2..], ["write", "close"]);
        assert!(!calls.iter().any(|c| c.starts_with("wait")));
    }

    #[test]
    fn failed_print_still_closes_popup() {
        let (host, browser) = host(Browser {
            print_fails: true,
            ..Browser::default()
        });
        let err = run(&host, &job(1)).unwrap_err();
        assert!(matches!(err, PrintWindowError::JsError(_)));
        assert_eq!(browser.calls().last().map(String::as_str), Some("close"));
    }

    #[test]
    fn empty_job_never_opens_a_popup() {
        let (host, browser) = host(Browser::default());
        let err = run(&host, &job(0)).unwrap_err();
        assert!(matches!(err, PrintWindowError::Print(PrintError::EmptyJob)));
        assert!(browser.calls().is_empty());
    }

    #[test]
    fn capture_prefers_on_screen_markup_and_renders_the_rest() {
        let (mut host, _browser) = host(Browser::default());
        let preview = r#"<div id="id-card-front-0">as previewed</div>"#;
        host.on_screen.insert("id-card-front-0".into(), preview.into());

        let mut job = job(2);
        job.print_mode = PrintMode::Double;
        let cards = capture_card_markup(&host, &job, &Package::default(), &Company::default());

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, preview);
        assert!(cards[0].back.starts_with(r#"<div id="id-card-back-0""#));
        assert!(cards[1].front.starts_with(r#"<div id="id-card-front-1""#));
        assert!(cards[1].front.contains("Pilgrim 1"));
    }
}
