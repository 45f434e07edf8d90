// tkwire-widgets/src/notebook.rs
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tkwire_core::{CallbackToken, Command, Component, Container, Flags, Tk, WidgetBase};

use crate::stack::Stack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    Open,
    Closed,
}

/// One page of a [`Notebook`]: a vertical box with a title
pub struct Tab {
    stack: Rc<Stack>,
    title: String,
    flags: Flags,
    state: Rc<Cell<TabState>>,
}

impl Tab {
    pub fn path(&self) -> String {
        self.stack.path()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn state(&self) -> TabState {
        self.state.get()
    }

    pub fn asks_for_close(&self) -> bool {
        self.flags.contains(Flags::ASK_FOR_CLOSE)
    }
}

impl Container for Tab {
    fn add(&self, children: &[Rc<dyn Component>]) {
        self.stack.add(children);
    }
}

struct Page {
    path: String,
    title: String,
    flags: Flags,
    state: Rc<Cell<TabState>>,
}

/// Tabbed container. Double-clicking a tab closes it unless the tab carries
/// [`Flags::DO_NOT_CLOSE`]; [`Flags::NOTEBOOK_BREAK_B1`] on the notebook
/// swallows mouse clicks on the tab row entirely.
pub struct Notebook {
    base: WidgetBase,
    pages: RefCell<Vec<Page>>,
}

impl Notebook {
    pub fn new(tk: &Tk, flags: Flags) -> Rc<Self> {
        Rc::new(Self {
            base: WidgetBase::new(tk, "ttk::notebook", Command::args(), flags),
            pages: RefCell::new(Vec::new()),
        })
    }

    pub fn path(&self) -> String {
        self.base.path()
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    /// Create a page titled `title` and append it
    pub fn new_tab(&self, title: &str, flags: Flags) -> Rc<Tab> {
        let stack = Stack::new(self.base.tk(), flags);
        let (path, _) = stack.clone().materialize(&self.base.path());
        let state = self.add_page(&path, title, flags);
        Rc::new(Tab {
            stack,
            title: title.to_string(),
            flags,
            state,
        })
    }

    fn add_page(&self, child: &str, title: &str, flags: Flags) -> Rc<Cell<TabState>> {
        let cmd = self
            .base
            .command("add")
            .arg(child)
            .opt("-text", title)
            .opt("-sticky", "news");
        self.base.tk().send(&cmd);

        let state = Rc::new(Cell::new(TabState::Open));
        self.pages.borrow_mut().push(Page {
            path: child.to_string(),
            title: title.to_string(),
            flags,
            state: state.clone(),
        });
        state
    }

    pub fn tab_count(&self) -> usize {
        self.pages.borrow().len()
    }

    pub fn tab_state(&self, path: &str) -> TabState {
        let pages = self.pages.borrow();
        match pages.iter().find(|page| page.path == path) {
            Some(page) => page.state.get(),
            None => TabState::Closed,
        }
    }

    /// Path and title of the selected page
    pub fn selection(&self) -> Option<(String, String)> {
        let tk = self.base.tk();
        let path = tk.query(&self.base.command("select")).ok()?;
        if path.is_empty() {
            return None;
        }
        let title = tk
            .query(&self.base.command("tab").arg(&path).arg("-text"))
            .ok()?;
        Some((path, title))
    }

    pub fn on_select(&self, callback: impl Fn(&str) + 'static) -> CallbackToken {
        self.base.bind("<<NotebookTabChanged>>", "", callback)
    }

    pub fn select(&self, path: &str) {
        self.base.tk().send(&self.base.command("select").arg(path));
    }

    pub fn select_tab(&self, tab: &Tab) {
        self.select(&tab.path());
    }

    /// Remove the page at `path` from the notebook
    pub fn close(&self, path: &str) {
        self.base.tk().send(&self.base.command("forget").arg(path));

        let mut pages = self.pages.borrow_mut();
        if let Some(at) = pages.iter().position(|page| page.path == path) {
            let page = pages.remove(at);
            page.state.set(TabState::Closed);
            tracing::debug!(path, title = %page.title, "tab closed");
        }
    }

    fn close_selected(&self) {
        let Some((path, _)) = self.selection() else {
            return;
        };
        let flags = self
            .pages
            .borrow()
            .iter()
            .find(|page| page.path == path)
            .map(|page| page.flags)
            .unwrap_or(Flags::empty());

        if flags.contains(Flags::DO_NOT_CLOSE) {
            return;
        }
        if flags.contains(Flags::ASK_FOR_CLOSE) {
            tracing::debug!(%path, "closing tab without confirmation");
        }
        self.close(&path);
    }

    fn bind_tab_clicks(self: &Rc<Self>) {
        if self.base.flags().contains(Flags::NOTEBOOK_BREAK_B1) {
            self.base.bind_script("<Double-1>", "break");
            self.base.bind_script("<Button-1>", "break");
            return;
        }

        let notebook: Weak<Self> = Rc::downgrade(self);
        self.base.bind("<Double-1>", "", move |_| {
            if let Some(notebook) = notebook.upgrade() {
                notebook.close_selected();
            }
        });
    }
}

impl Component for Notebook {
    fn materialize(self: Rc<Self>, parent: &str) -> (String, Flags) {
        let (path, flags) = self.base.create(parent);
        self.base.tk().register_widget(&path, self.clone());
        self.bind_tab_clicks();
        (path, flags)
    }
}

impl Container for Notebook {
    /// Each child becomes its own page, titled by position
    fn add(&self, children: &[Rc<dyn Component>]) {
        let Some(path) = self.base.placed_path("add") else {
            return;
        };
        for child in children {
            let title = format!("Tab {}", self.tab_count() + 1);
            let (child_path, child_flags) = child.clone().materialize(&path);
            self.add_page(&child_path, &title, child_flags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;
    use tkwire_core::{Handle, Recorder};

    fn notebook(flags: Flags) -> (Rc<Recorder>, Tk, Rc<Notebook>) {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let nb = Notebook::new(&tk, flags);
        nb.clone().materialize("");
        (rec, tk, nb)
    }

    fn double_click_handle(rec: &Recorder) -> Handle {
        let binds = rec.commands_starting_with("bind .1 <Double-1>");
        let name = binds[0]
            .trim_start_matches("bind .1 <Double-1> {")
            .trim_end_matches('}')
            .to_string();
        rec.handle_of(&name).unwrap()
    }

    #[test]
    fn test_double_click_closes_tab() {
        let (rec, tk, nb) = notebook(Flags::empty());
        let tab = nb.new_tab("Log", Flags::empty());
        assert_eq!(tab.path(), ".1.3");
        assert!(rec.commands().contains(&".1 add .1.3 -text Log -sticky news".to_string()));

        rec.respond(".1 select", ".1.3");
        rec.respond(".1 tab .1.3 -text", "Log");
        tk.dispatch(double_click_handle(&rec), "");

        assert_eq!(tab.state(), TabState::Closed);
        assert_eq!(nb.tab_count(), 0);
        assert_eq!(rec.commands().last().unwrap(), ".1 forget .1.3");
    }

    #[test]
    fn test_do_not_close_tab_survives_double_click() {
        let (rec, tk, nb) = notebook(Flags::empty());
        let tab = nb.new_tab("Main", Flags::DO_NOT_CLOSE);

        rec.respond(".1 select", &tab.path());
        tk.dispatch(double_click_handle(&rec), "");

        assert_eq!(tab.state(), TabState::Open);
        assert_eq!(nb.tab_state(&tab.path()), TabState::Open);
        assert!(rec.commands_starting_with(".1 forget").is_empty());
    }

    #[test]
    fn test_ask_for_close_tab_closes_like_any_other() {
        let (rec, tk, nb) = notebook(Flags::empty());
        let tab = nb.new_tab("Draft", Flags::ASK_FOR_CLOSE);
        assert!(tab.asks_for_close());

        rec.respond(".1 select", &tab.path());
        tk.dispatch(double_click_handle(&rec), "");

        assert_eq!(tab.state(), TabState::Closed);
        assert_eq!(nb.tab_state(&tab.path()), TabState::Closed);
        assert_eq!(rec.commands_starting_with(".1 forget"), vec![".1 forget .1.3"]);
    }

    #[test]
    fn test_break_b1_swallows_clicks() {
        let (rec, _tk, _nb) = notebook(Flags::NOTEBOOK_BREAK_B1);
        assert_eq!(
            rec.commands_starting_with("bind ."),
            vec!["bind .1 <Double-1> {break}", "bind .1 <Button-1> {break}"]
        );
        assert_eq!(rec.commands().len(), 3);
    }

    #[test]
    fn test_add_titles_pages_by_position() {
        let (rec, tk, nb) = notebook(Flags::empty());
        nb.add(&[
            Label::new(&tk, "a", Flags::empty()),
            Label::new(&tk, "b", Flags::empty()),
        ]);

        assert_eq!(
            rec.commands_starting_with(".1 add"),
            vec![
                ".1 add .1.3 -text \"Tab 1\" -sticky news",
                ".1 add .1.4 -text \"Tab 2\" -sticky news",
            ]
        );
        rec.respond(".1 select", ".1.4");
        rec.respond(".1 tab .1.4 -text", "Tab 2");
        assert_eq!(nb.selection(), Some((".1.4".to_string(), "Tab 2".to_string())));
    }
}
