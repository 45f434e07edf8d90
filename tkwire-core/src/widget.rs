// tkwire-core/src/widget.rs
use std::cell::RefCell;
use std::fmt;

use crate::command::{Command, parse_list};
use crate::flags::Flags;
use crate::ident::{child_path, window_target};
use crate::tk::{CallbackToken, Tk};

/// State and operations shared by every widget: the toolkit command that
/// creates it, its init arguments, its flags and, once materialized, its
/// path.
pub struct WidgetBase {
    tk: Tk,
    kind: &'static str,
    init: Command,
    flags: Flags,
    path: RefCell<Option<String>>,
}

impl WidgetBase {
    pub fn new(tk: &Tk, kind: &'static str, init: Command, flags: Flags) -> Self {
        Self {
            tk: tk.clone(),
            kind,
            init,
            flags,
            path: RefCell::new(None),
        }
    }

    pub fn tk(&self) -> &Tk {
        &self.tk
    }

    /// Toolkit command name, e.g. `ttk::label`
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Assigned path; empty until materialized
    pub fn path(&self) -> String {
        self.path.borrow().clone().unwrap_or_default()
    }

    pub fn is_materialized(&self) -> bool {
        self.path.borrow().is_some()
    }

    /// Create the toolkit object as a fresh child of `parent`
    pub fn create(&self, parent: &str) -> (String, Flags) {
        if let Some(old) = self.path.borrow().as_deref() {
            tracing::warn!(kind = self.kind, path = old, "widget materialized twice");
        }

        let path = child_path(parent, &self.tk.next_id());
        let cmd = Command::new(self.kind).arg(&path).extend(&self.init);
        self.tk.send(&cmd);

        *self.path.borrow_mut() = Some(path.clone());
        (path, self.flags)
    }

    /// Take over an existing toolkit object (the main window, a toplevel)
    /// instead of creating one
    pub fn adopt(&self, path: &str) {
        *self.path.borrow_mut() = Some(path.to_string());
    }

    /// Toolkit name of the placed widget (`.` for the main window)
    fn target(&self) -> Option<String> {
        self.path
            .borrow()
            .as_deref()
            .map(|path| window_target(path).to_string())
    }

    fn target_or_warn(&self, action: &str) -> Option<String> {
        self.placed_path(action)
            .map(|path| window_target(&path).to_string())
    }

    /// Path of the placed widget (`""` for the main window); logs and
    /// returns `None` before placement
    pub fn placed_path(&self, action: &str) -> Option<String> {
        let path = self.path.borrow().clone();
        if path.is_none() {
            tracing::warn!(kind = self.kind, action, "widget is not placed yet");
        }
        path
    }

    /// `<path> <subcommand>`, ready for more arguments. Before the widget is
    /// placed the command is detached and evaluating it fails.
    pub fn command(&self, subcommand: &str) -> Command {
        match self.target() {
            Some(target) => Command::new(target).arg(subcommand),
            None => Command::detached().arg(subcommand),
        }
    }

    pub fn configure(&self, option: &str, value: impl fmt::Display) {
        self.tk.send(&self.command("configure").opt(option, value));
    }

    pub fn cget(&self, option: &str) -> Option<String> {
        self.tk.query(&self.command("cget").arg(option)).ok()
    }

    pub fn destroy(&self) {
        let Some(target) = self.target_or_warn("destroy") else {
            return;
        };
        self.tk.send(&Command::new("destroy").arg(target));
        self.tk.forget_widget(&self.path());
    }

    pub fn destroy_children(&self) {
        let Some(target) = self.target_or_warn("destroy children") else {
            return;
        };
        let listing = self
            .tk
            .query(&Command::new("winfo").arg("children").arg(target));
        let Ok(listing) = listing else {
            return;
        };

        let children = match parse_list(&listing) {
            Ok(children) => children,
            Err(err) => {
                tracing::warn!(%listing, error = %err, "unreadable child list");
                return;
            }
        };
        for child in children {
            self.tk.send(&Command::new("destroy").arg(&child));
            self.tk.forget_widget(&child);
        }
    }

    /// Bind `event` to `callback`. Each character of `params` names a `%`
    /// substitution appended to the callback arguments, so `"Wxy"` delivers
    /// `"<cmd> <widget> <x> <y>"` as the payload.
    pub fn bind(&self, event: &str, params: &str, callback: impl Fn(&str) + 'static) -> CallbackToken {
        let token = self.tk.register_callback(callback);
        self.bind_script(event, &callback_script(&token, params));
        token
    }

    /// Bind `event` to a fixed script such as `break`
    pub fn bind_script(&self, event: &str, script: &str) {
        let Some(target) = self.target_or_warn("bind") else {
            return;
        };
        let cmd = Command::new("bind")
            .arg(target)
            .arg(event)
            .script(script);
        self.tk.send(&cmd);
    }

    pub fn event_generate(&self, event: &str) {
        let Some(target) = self.target_or_warn("event generate") else {
            return;
        };
        let cmd = Command::new("event")
            .arg("generate")
            .arg(target)
            .arg(event);
        self.tk.send(&cmd);
    }
}

/// Script invoking `token` with `%` substitutions, one per char of `params`
pub fn callback_script(token: &CallbackToken, params: &str) -> String {
    let mut script = token.name().to_string();
    for param in params.chars() {
        script.push_str(" %");
        script.push(param);
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Recorder;
    use std::rc::Rc;

    fn base(kind: &'static str) -> (Rc<Recorder>, WidgetBase) {
        let rec = Rc::new(Recorder::new());
        let tk = Tk::new(rec.clone());
        let init = Command::args().opt("-text", "Hello world");
        (rec, WidgetBase::new(&tk, kind, init, Flags::EXPAND))
    }

    #[test]
    fn test_create_assigns_child_path() {
        let (rec, widget) = base("ttk::label");
        assert!(!widget.is_materialized());

        let (path, flags) = widget.create(".9");
        assert_eq!(path, ".9.1");
        assert_eq!(flags, Flags::EXPAND);
        assert_eq!(widget.path(), ".9.1");
        assert_eq!(rec.commands(), vec!["ttk::label .9.1 -text \"Hello world\"".to_string()]);
    }

    #[test]
    fn test_bind_with_substitutions() {
        let (rec, widget) = base("ttk::label");
        widget.create("");
        let token = widget.bind("<Button-1>", "Wx", |_| {});

        assert_eq!(token.name(), "2");
        assert_eq!(
            rec.commands().last().unwrap(),
            "bind .1 <Button-1> {2 %W %x}"
        );
    }

    struct Child;

    impl crate::Component for Child {
        fn materialize(self: Rc<Self>, _parent: &str) -> (String, Flags) {
            (String::new(), Flags::empty())
        }
    }

    #[test]
    fn test_destroy_children_prunes_widget_map() {
        let (rec, widget) = base("ttk::frame");
        widget.create("");
        let tk = widget.tk();
        tk.register_widget(".1", Rc::new(Child));
        tk.register_widget(".1.5", Rc::new(Child));
        tk.register_widget(".1.6", Rc::new(Child));
        tk.register_widget(".1.6.9", Rc::new(Child));
        rec.respond("winfo children .1", ".1.5 .1.6");

        widget.destroy_children();
        let destroyed = rec.commands_starting_with("destroy");
        assert_eq!(destroyed, vec!["destroy .1.5".to_string(), "destroy .1.6".to_string()]);
        assert_eq!(tk.widget_count(), 1);
        assert!(tk.lookup(".1").is_some());
        assert!(tk.lookup(".1.6.9").is_none());
    }

    #[test]
    fn test_unplaced_widget_never_targets_main_window() {
        let (rec, widget) = base("ttk::label");
        let tk = widget.tk();
        tk.register_widget(".1", Rc::new(Child));
        tk.register_widget(".1.2", Rc::new(Child));

        widget.configure("-text", "x");
        widget.destroy();
        widget.destroy_children();
        widget.bind_script("<Button-1>", "break");
        widget.event_generate("<<Refresh>>");
        assert!(widget.cget("-text").is_none());

        assert!(rec.commands().is_empty());
        assert_eq!(tk.widget_count(), 2);
    }

    #[test]
    fn test_main_window_target() {
        let (rec, widget) = base("ttk::frame");
        widget.adopt("");
        widget.event_generate("<<Refresh>>");
        assert_eq!(rec.commands(), vec!["event generate . <<Refresh>>".to_string()]);
    }
}
