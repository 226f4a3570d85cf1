//! Popup side of the login: the provider redirects the popup back to the
//! widget page with the token in the URL fragment.  The handler stores the
//! record, hands it to the opener and closes the popup.

use crate::fragment::parse_fragment;
use crate::ports::Opener;
use crate::storage::SessionStore;

/// Returns `true` when the fragment carried a response and the popup was
/// dismissed; `false` means this page load is a normal widget render.
pub fn handle_redirect(fragment: &str, store: &dyn SessionStore, opener: &dyn Opener) -> bool {
    if fragment.is_empty() {
        return false;
    }

    let record = parse_fragment(fragment);
    if record.is_empty() {
        return false;
    }

    crate::debug_log!("redirect: relaying {} fragment keys to opener", record.len());
    store.save(&record);
    opener.post(&record);
    opener.close();
    true
}
