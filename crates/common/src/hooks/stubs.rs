// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Recording handlers for tests.

use std::{any::Any, cell::RefCell, fmt::Debug, rc::Rc};

use ustr::Ustr;

use super::handler::{ActionHandler, ShareableActionHandler};

/// Action handler which saves a copy of every context it receives.
#[derive(Debug, Clone)]
pub struct SavingActionHandler<C> {
    id: Ustr,
    received: Rc<RefCell<Vec<C>>>,
}

impl<C: Clone + Debug + 'static> SavingActionHandler<C> {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: Ustr::from(id),
            received: Rc::new(RefCell::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn received(&self) -> Vec<C> {
        self.received.borrow().clone()
    }

    /// Returns a `ShareableActionHandler` for registration.
    #[must_use]
    pub fn handler(&self) -> ShareableActionHandler {
        ShareableActionHandler(Rc::new(self.clone()))
    }
}

impl<C: Clone + Debug + 'static> ActionHandler for SavingActionHandler<C> {
    fn id(&self) -> Ustr {
        self.id
    }

    fn handle(&self, context: &dyn Any) {
        if let Some(c) = context.downcast_ref::<C>() {
            self.received.borrow_mut().push(c.clone());
        } else {
            log::error!(
                "SavingActionHandler: expected {}",
                std::any::type_name::<C>()
            );
        }
    }
}

/// Creates a saving action handler and returns both the handler for registration and a
/// clone used to inspect what it received.
#[must_use]
pub fn get_saving_action_handler<C: Clone + Debug + 'static>(
    id: &str,
) -> (ShareableActionHandler, SavingActionHandler<C>) {
    let saver = SavingActionHandler::new(id);
    let handler = saver.handler();
    (handler, saver)
}
