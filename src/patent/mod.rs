mod session;

pub(crate) use session::{
    Applied, EditSession, SubmitRejection, Ticket, MSG_RECORD_FAILED, MSG_ROSTER_FAILED,
    MSG_UPDATED, MSG_UPDATE_FAILED,
};

use crate::api::{ApiError, PatentApi};
use crate::notify::{Navigator, Notice, Notifier};
use futures::future::join;
use leptos::logging::{error, warn};
use leptos::prelude::*;
use std::rc::Rc;

/// Route shown after a successful save.
pub(crate) const LISTING_ROUTE: &str = "/dashboard/patent";

/// Where an [`EditSession`] lives. `None` means the owner is gone.
pub(crate) trait SessionStore {
    fn update_session<T>(&self, f: impl FnOnce(&mut EditSession) -> T) -> Option<T>;
}

impl SessionStore for RwSignal<EditSession> {
    fn update_session<T>(&self, f: impl FnOnce(&mut EditSession) -> T) -> Option<T> {
        self.try_update(f)
    }
}

/// Drives the edit form: fetches, submit, and the notify/navigate side effects.
///
/// All state lives in the store; the editor holds none, so it is cheap to
/// rebuild per event.
pub(crate) struct PatentEditor<A, S> {
    api: A,
    session: S,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
}

impl<A: PatentApi, S: SessionStore> PatentEditor<A, S> {
    pub fn new(
        api: A,
        session: S,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            navigator,
        }
    }

    fn report(&self, applied: Option<Applied>) {
        if let Some(Applied::Failed(message)) = applied {
            self.notifier.notify(Notice::error(message));
        }
    }

    /// Fetch roster and record concurrently under a fresh generation.
    pub async fn load(&self, id: &str) {
        let Some(ticket) = self.session.update_session(EditSession::begin_load) else {
            return;
        };
        join(self.load_roster(ticket), self.load_record(ticket, id)).await;
    }

    pub async fn load_roster(&self, ticket: Ticket) {
        let result = self.api.list_members().await;
        if let Err(e) = &result {
            error!("{MSG_ROSTER_FAILED}: {e}");
        }
        self.report(self.session.update_session(|s| s.apply_roster(ticket, result)));
    }

    pub async fn load_record(&self, ticket: Ticket, id: &str) {
        let result = if id.trim().is_empty() {
            Err(ApiError::Status {
                status: 404,
                body: "missing brevet id in route".to_string(),
            })
        } else {
            self.api.get_brevet(id).await
        };
        if let Err(e) = &result {
            error!("{MSG_RECORD_FAILED} {id}: {e}");
        }
        self.report(self.session.update_session(|s| s.apply_record(ticket, result)));
    }

    /// Validate, write, then notify and navigate on success.
    pub async fn submit(&self, id: &str) {
        let begun = match self.session.update_session(EditSession::begin_submit) {
            Some(begun) => begun,
            None => return,
        };

        let (ticket, body) = match begun {
            Ok(ok) => ok,
            Err(SubmitRejection::Invalid(e)) => {
                self.notifier.notify(Notice::error(e.to_string()));
                return;
            }
            Err(SubmitRejection::InFlight) => {
                warn!("brevet {id}: submit ignored, previous save still in flight");
                return;
            }
        };

        let result = self.api.update_brevet(id, &body).await;
        if let Err(e) = &result {
            error!(
                "{MSG_UPDATE_FAILED} {id}: {e} (status: {:?}, payload: {:?})",
                e.status(),
                body
            );
        }

        match self.session.update_session(|s| s.finish_submit(ticket, result)) {
            Some(Applied::Updated) => {
                self.notifier.notify(Notice::success(MSG_UPDATED));
                self.navigator.navigate(LISTING_ROUTE);
            }
            other => self.report(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::session::SubmitPhase;
    use super::*;
    use crate::api::{ApiResult, UpdateBrevetRequest};
    use crate::models::{AuthorRef, Brevet, Member};
    use crate::notify::NoticeLevel;
    use futures::executor::block_on;
    use std::cell::RefCell;

    impl SessionStore for Rc<RefCell<EditSession>> {
        fn update_session<T>(&self, f: impl FnOnce(&mut EditSession) -> T) -> Option<T> {
            Some(f(&mut *self.borrow_mut()))
        }
    }

    #[derive(Default)]
    struct FakeApi {
        members: Option<Vec<Member>>,
        brevet: Option<Brevet>,
        update_ok: bool,
        updates: RefCell<Vec<(String, UpdateBrevetRequest)>>,
        /// Starts a reload on this session while the PUT is outstanding.
        reload_during_update: Option<Rc<RefCell<EditSession>>>,
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        }
    }

    impl PatentApi for &FakeApi {
        async fn list_members(&self) -> ApiResult<Vec<Member>> {
            self.members.clone().ok_or_else(server_error)
        }

        async fn get_brevet(&self, _id: &str) -> ApiResult<Brevet> {
            self.brevet.clone().ok_or_else(server_error)
        }

        async fn update_brevet(&self, id: &str, body: &UpdateBrevetRequest) -> ApiResult<()> {
            self.updates
                .borrow_mut()
                .push((id.to_string(), body.clone()));
            if let Some(session) = &self.reload_during_update {
                session.borrow_mut().begin_load();
            }
            if self.update_ok {
                Ok(())
            } else {
                Err(server_error())
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        notices: RefCell<Vec<Notice>>,
        routes: RefCell<Vec<String>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.notices.borrow_mut().push(notice);
        }
    }

    impl Navigator for Recorder {
        fn navigate(&self, path: &str) {
            self.routes.borrow_mut().push(path.to_string());
        }
    }

    fn editor<'a>(
        api: &'a FakeApi,
        rec: &Rc<Recorder>,
    ) -> (PatentEditor<&'a FakeApi, Rc<RefCell<EditSession>>>, Rc<RefCell<EditSession>>) {
        let session = Rc::new(RefCell::new(EditSession::default()));
        let e = PatentEditor::new(api, session.clone(), rec.clone(), rec.clone());
        (e, session)
    }

    fn roster() -> Vec<Member> {
        vec![
            Member {
                id: "1".to_string(),
                user_id: "u1".to_string(),
                name: "Alice".to_string(),
            },
            Member {
                id: "2".to_string(),
                user_id: "u2".to_string(),
                name: "Bob".to_string(),
            },
        ]
    }

    fn record() -> Brevet {
        Brevet {
            id: "7".to_string(),
            title: "T".to_string(),
            doi: "D".to_string(),
            author: "Alice".to_string(),
            id_user: "u1".to_string(),
        }
    }

    #[test]
    fn test_load_populates_roster_and_record() {
        let api = FakeApi {
            members: Some(roster()),
            brevet: Some(record()),
            ..Default::default()
        };
        let rec = Rc::new(Recorder::default());
        let (e, session) = editor(&api, &rec);

        block_on(e.load("7"));

        let s = session.borrow();
        assert_eq!(s.roster(), roster().as_slice());
        assert_eq!(s.title(), "T");
        assert_eq!(s.authors(), &[AuthorRef::new("u1", "Alice")]);
        assert!(!s.is_loading());
        assert!(rec.notices.borrow().is_empty());
    }

    #[test]
    fn test_roster_failure_notifies_but_record_still_loads() {
        let api = FakeApi {
            brevet: Some(record()),
            ..Default::default()
        };
        let rec = Rc::new(Recorder::default());
        let (e, session) = editor(&api, &rec);

        block_on(e.load("7"));

        assert_eq!(rec.notices.borrow().as_slice(), &[Notice::error(MSG_ROSTER_FAILED)]);
        let s = session.borrow();
        assert!(s.roster().is_empty());
        assert_eq!(s.title(), "T");
        assert_eq!(s.error(), Some(MSG_ROSTER_FAILED));
    }

    #[test]
    fn test_empty_route_id_fails_record_load_without_request() {
        let api = FakeApi {
            members: Some(roster()),
            brevet: Some(record()),
            ..Default::default()
        };
        let rec = Rc::new(Recorder::default());
        let (e, session) = editor(&api, &rec);

        block_on(e.load(""));

        assert_eq!(rec.notices.borrow().as_slice(), &[Notice::error(MSG_RECORD_FAILED)]);
        assert_eq!(session.borrow().title(), "");
    }

    #[test]
    fn test_submit_without_authors_sends_nothing() {
        let api = FakeApi {
            update_ok: true,
            ..Default::default()
        };
        let rec = Rc::new(Recorder::default());
        let (e, _session) = editor(&api, &rec);

        block_on(e.submit("7"));

        assert!(api.updates.borrow().is_empty());
        assert!(rec.routes.borrow().is_empty());
        assert_eq!(
            rec.notices.borrow().as_slice(),
            &[Notice::error("Veuillez sélectionner au moins un auteur.")]
        );
    }

    #[test]
    fn test_successful_submit_navigates_to_listing() {
        let api = FakeApi {
            members: Some(roster()),
            brevet: Some(record()),
            update_ok: true,
            ..Default::default()
        };
        let rec = Rc::new(Recorder::default());
        let (e, session) = editor(&api, &rec);

        block_on(e.load("7"));
        session
            .borrow_mut()
            .select_authors(vec![AuthorRef::new("u1", "Alice"), AuthorRef::new("u2", "Bob")]);
        block_on(e.submit("7"));

        let updates = api.updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "7");
        assert_eq!(
            updates[0].1,
            UpdateBrevetRequest {
                title: "T".to_string(),
                doi: "D".to_string(),
                author: "Alice, Bob".to_string(),
                id_user: "u1,u2".to_string(),
            }
        );
        assert_eq!(rec.routes.borrow().as_slice(), &[LISTING_ROUTE.to_string()]);
        assert_eq!(rec.notices.borrow().last(), Some(&Notice::success(MSG_UPDATED)));
        assert_eq!(session.borrow().phase(), SubmitPhase::Succeeded);
    }

    #[test]
    fn test_failed_submit_stays_on_page() {
        let api = FakeApi {
            members: Some(roster()),
            brevet: Some(record()),
            update_ok: false,
            ..Default::default()
        };
        let rec = Rc::new(Recorder::default());
        let (e, session) = editor(&api, &rec);

        block_on(e.load("7"));
        block_on(e.submit("7"));

        assert_eq!(api.updates.borrow().len(), 1);
        assert!(rec.routes.borrow().is_empty());
        let notices = rec.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, MSG_UPDATE_FAILED);

        let s = session.borrow();
        assert_eq!(s.phase(), SubmitPhase::Failed);
        assert_eq!(s.title(), "T");
        assert_eq!(s.authors().len(), 1);
    }

    #[test]
    fn test_submit_while_in_flight_is_dropped() {
        let api = FakeApi {
            update_ok: true,
            ..Default::default()
        };
        let rec = Rc::new(Recorder::default());
        let (e, session) = editor(&api, &rec);

        session
            .borrow_mut()
            .select_authors(vec![AuthorRef::new("u1", "Alice")]);
        // Simulate an outstanding save.
        let _pending = session.borrow_mut().begin_submit().expect("valid form");

        block_on(e.submit("7"));

        assert!(api.updates.borrow().is_empty());
        assert!(rec.notices.borrow().is_empty());
        assert!(rec.routes.borrow().is_empty());
    }

    #[test]
    fn test_result_after_teardown_has_no_effect() {
        let api = FakeApi {
            update_ok: true,
            ..Default::default()
        };
        let rec = Rc::new(Recorder::default());
        let (e, session) = editor(&api, &rec);

        let ticket = session.borrow_mut().begin_load();
        session.borrow_mut().teardown();
        block_on(e.load_roster(ticket));

        assert!(rec.notices.borrow().is_empty());
        assert!(session.borrow().error().is_none());
    }

    fn submit_across_reload(update_ok: bool) -> (Rc<Recorder>, Rc<RefCell<EditSession>>) {
        let session = Rc::new(RefCell::new(EditSession::default()));
        session
            .borrow_mut()
            .select_authors(vec![AuthorRef::new("u1", "Alice")]);
        let api = FakeApi {
            update_ok,
            reload_during_update: Some(session.clone()),
            ..Default::default()
        };
        let rec = Rc::new(Recorder::default());
        let e = PatentEditor::new(&api, session.clone(), rec.clone(), rec.clone());

        block_on(e.submit("7"));

        assert_eq!(api.updates.borrow().len(), 1);
        (rec, session)
    }

    #[test]
    fn test_reload_during_save_still_navigates_on_success() {
        let (rec, session) = submit_across_reload(true);

        assert_eq!(rec.routes.borrow().as_slice(), &[LISTING_ROUTE.to_string()]);
        assert_eq!(rec.notices.borrow().as_slice(), &[Notice::success(MSG_UPDATED)]);
        assert_eq!(session.borrow().phase(), SubmitPhase::Succeeded);
    }

    #[test]
    fn test_reload_during_save_still_reports_failure() {
        let (rec, session) = submit_across_reload(false);

        assert!(rec.routes.borrow().is_empty());
        assert_eq!(rec.notices.borrow().as_slice(), &[Notice::error(MSG_UPDATE_FAILED)]);
        assert_eq!(session.borrow().error(), Some(MSG_UPDATE_FAILED));
    }
}
