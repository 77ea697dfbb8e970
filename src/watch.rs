/// One-shot watch for the late-mounting comments section

use crate::dom::PageDom;

/// Node name fragment of YouTube's comments renderer elements
const COMMENTS_NODE: &str = "ytd-comments";
const COMMENTS_SELECTOR: &str = "#comments";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    Keep,
    Disconnect,
}

/// Fires on the first child-list change inside a comments subtree, then never again
#[derive(Debug, Clone)]
pub struct CommentsWatch {
    hide_comments: bool,
    fired: bool,
}

impl CommentsWatch {
    pub fn new(hide_comments: bool) -> CommentsWatch {
        CommentsWatch {
            hide_comments,
            fired: false,
        }
    }

    /// Handle one batch of child-list mutations, given their target node names
    pub fn observe<'a>(
        &mut self,
        dom: &impl PageDom,
        targets: impl IntoIterator<Item = &'a str>,
    ) -> WatchOutcome {
        if self.fired {
            return WatchOutcome::Disconnect;
        }

        let touches_comments = targets
            .into_iter()
            .any(|name| name.to_lowercase().contains(COMMENTS_NODE));
        if !touches_comments {
            return WatchOutcome::Keep;
        }

        log::debug!("A child node related to comments has changed.");
        self.fired = true;
        if self.hide_comments {
            dom.hide(COMMENTS_SELECTOR);
        }
        WatchOutcome::Disconnect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{TargetId, default_descriptors};
    use crate::dom::fake::FakeDom;
    use crate::reconciler::{Completion, PassOutcome, ReconcileSession};

    #[test]
    fn test_ignores_unrelated_mutations() {
        let dom = FakeDom::with(&["#comments"]);
        let mut watch = CommentsWatch::new(true);

        let outcome = watch.observe(&dom, ["DIV", "YTD-RICH-ITEM-RENDERER"]);

        assert_eq!(outcome, WatchOutcome::Keep);
        assert_eq!(dom.hidden("#comments"), Some(false));

        // still armed for the comments section
        assert_eq!(watch.observe(&dom, ["YTD-COMMENTS"]), WatchOutcome::Disconnect);
        assert_eq!(dom.hidden("#comments"), Some(true));
    }

    #[test]
    fn test_hides_comments_on_first_comments_mutation() {
        let dom = FakeDom::with(&["#comments"]);
        let mut watch = CommentsWatch::new(true);

        let outcome = watch.observe(&dom, ["DIV", "YTD-COMMENTS"]);

        assert_eq!(outcome, WatchOutcome::Disconnect);
        assert_eq!(dom.hidden("#comments"), Some(true));
    }

    #[test]
    fn test_matches_comments_subtree_names() {
        let dom = FakeDom::with(&["#comments"]);
        let mut watch = CommentsWatch::new(true);

        let outcome = watch.observe(&dom, ["ytd-comments-header-renderer"]);

        assert_eq!(outcome, WatchOutcome::Disconnect);
        assert_eq!(dom.hidden("#comments"), Some(true));
    }

    #[test]
    fn test_disconnects_without_hiding_when_comments_kept() {
        let dom = FakeDom::with(&["#comments"]);
        let mut watch = CommentsWatch::new(false);

        let outcome = watch.observe(&dom, ["YTD-COMMENTS"]);

        assert_eq!(outcome, WatchOutcome::Disconnect);
        assert!(dom.hide_calls().is_empty());
    }

    #[test]
    fn test_fires_at_most_once() {
        let dom = FakeDom::with(&["#comments"]);
        let mut watch = CommentsWatch::new(true);

        watch.observe(&dom, ["YTD-COMMENTS"]);
        dom.insert("#comments", false);
        let outcome = watch.observe(&dom, ["YTD-COMMENTS", "ytd-comments-header-renderer"]);

        assert_eq!(outcome, WatchOutcome::Disconnect);
        assert_eq!(dom.hide_calls().len(), 1);
        assert_eq!(dom.hidden("#comments"), Some(false));
    }

    #[test]
    fn test_late_comments_hidden_by_watch_before_next_poll() {
        let mut descriptors = default_descriptors();
        for descriptor in descriptors.iter_mut() {
            descriptor.desired_hidden = descriptor.id == TargetId::Comments;
        }
        let dom = FakeDom::new();
        let mut session = ReconcileSession::new(descriptors);
        let mut watch = CommentsWatch::new(true);

        let mut now = 0.0;
        while now < 3_000.0 {
            assert_eq!(session.reconcile(&dom, now), PassOutcome::Retry);
            now += 50.0;
        }
        assert!(dom.hide_calls().is_empty());

        // comments mount at t=3000, the watch sees it first
        dom.insert("#comments", false);
        assert_eq!(watch.observe(&dom, ["YTD-COMMENTS"]), WatchOutcome::Disconnect);
        assert_eq!(dom.hidden("#comments"), Some(true));

        // the next poll finds it already hidden
        session.reconcile(&dom, now);
        assert_eq!(dom.hide_calls().len(), 1);
        assert_eq!(session.reconcile(&dom, 10_000.0), PassOutcome::Done(Completion::TimedOut));
    }
}
