//! [§ 13.2.6.4 The rules for parsing tokens in HTML content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml)
//!
//! One `handle_*_mode` method per insertion mode, grouped by the part of the
//! document they cover.

mod after;
mod in_body;
mod in_head;
mod in_select;
mod in_table;
mod in_template;
mod initial;
