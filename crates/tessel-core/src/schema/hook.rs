use super::Function;
use crate::{Error, Result};

use std::{fmt, str::FromStr};

/// A lifecycle hook: the function and the engine actions it is attached to.
#[derive(Debug, Clone, PartialEq)]
pub struct Hook {
    /// Actions the hook fires on, in declaration order
    pub actions: Vec<HookAction>,

    pub function: Function,
}

impl Hook {
    pub fn new(action: HookAction, function: Function) -> Hook {
        Hook {
            actions: vec![action],
            function,
        }
    }

    pub fn fires_on(&self, action: HookAction) -> bool {
        self.actions.contains(&action)
    }
}

macro_rules! hook_actions {
    ( $( $variant:ident => $name:literal, )* ) => {
        /// Lifecycle actions the mapping engine can attach hooks to.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HookAction {
            $( $variant, )*
        }

        impl HookAction {
            /// Every action, in the engine's lifecycle order.
            pub const ALL: &'static [HookAction] = &[ $( HookAction::$variant, )* ];

            /// The engine's name for the action.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( HookAction::$variant => $name, )*
                }
            }
        }

        impl FromStr for HookAction {
            type Err = Error;

            fn from_str(src: &str) -> Result<HookAction> {
                match src {
                    $( $name => Ok(HookAction::$variant), )*
                    _ => Err(crate::err!("unknown hook action `{src}`")),
                }
            }
        }
    };
}

hook_actions! {
    BeforeValidate => "beforeValidate",
    AfterValidate => "afterValidate",
    ValidationFailed => "validationFailed",
    BeforeCreate => "beforeCreate",
    AfterCreate => "afterCreate",
    BeforeDestroy => "beforeDestroy",
    AfterDestroy => "afterDestroy",
    BeforeRestore => "beforeRestore",
    AfterRestore => "afterRestore",
    BeforeUpdate => "beforeUpdate",
    AfterUpdate => "afterUpdate",
    BeforeSave => "beforeSave",
    AfterSave => "afterSave",
    BeforeUpsert => "beforeUpsert",
    AfterUpsert => "afterUpsert",
    BeforeBulkCreate => "beforeBulkCreate",
    AfterBulkCreate => "afterBulkCreate",
    BeforeBulkDestroy => "beforeBulkDestroy",
    AfterBulkDestroy => "afterBulkDestroy",
    BeforeBulkRestore => "beforeBulkRestore",
    AfterBulkRestore => "afterBulkRestore",
    BeforeBulkUpdate => "beforeBulkUpdate",
    AfterBulkUpdate => "afterBulkUpdate",
    BeforeFind => "beforeFind",
    BeforeFindAfterExpandIncludeAll => "beforeFindAfterExpandIncludeAll",
    BeforeFindAfterOptions => "beforeFindAfterOptions",
    AfterFind => "afterFind",
    BeforeCount => "beforeCount",
    BeforeDefine => "beforeDefine",
    AfterDefine => "afterDefine",
    BeforeInit => "beforeInit",
    AfterInit => "afterInit",
    BeforeAssociate => "beforeAssociate",
    AfterAssociate => "afterAssociate",
    BeforeConnect => "beforeConnect",
    AfterConnect => "afterConnect",
    BeforeDisconnect => "beforeDisconnect",
    AfterDisconnect => "afterDisconnect",
    BeforeSync => "beforeSync",
    AfterSync => "afterSync",
    BeforeBulkSync => "beforeBulkSync",
    AfterBulkSync => "afterBulkSync",
    BeforeQuery => "beforeQuery",
    AfterQuery => "afterQuery",
}

impl HookAction {
    /// Bulk actions receive the whole batch rather than a single record.
    pub fn is_bulk(self) -> bool {
        self.as_str().contains("Bulk")
    }
}

impl fmt::Display for HookAction {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}
