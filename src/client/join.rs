/*
    Constellation client, scenario data access for constellation views
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use futures::future::poll_fn;
use std::future::Future;
use std::pin::pin;
use std::task::Poll;

/// Runs two fallible futures side by side on the calling task.
///
/// Both futures are polled before either outcome is looked at, so both are started even if one fails
/// on its first poll. Resolves with the first error seen, dropping the other future, or with both values.
pub(crate) async fn try_join_started<A, B, TA, TB, E>(a: A, b: B) -> Result<(TA, TB), E>
where
    A: Future<Output = Result<TA, E>>,
    B: Future<Output = Result<TB, E>>,
{
    let mut a = pin!(a);
    let mut b = pin!(b);
    let mut a_out = None;
    let mut b_out = None;

    poll_fn(|cx| -> Poll<Result<(TA, TB), E>> {
        let a_poll = match a_out {
            None => a.as_mut().poll(cx),
            Some(_) => Poll::Pending,
        };
        let b_poll = match b_out {
            None => b.as_mut().poll(cx),
            Some(_) => Poll::Pending,
        };

        if let Poll::Ready(out) = a_poll {
            a_out = Some(out?);
        }
        if let Poll::Ready(out) = b_poll {
            b_out = Some(out?);
        }

        match (a_out.take(), b_out.take()) {
            (Some(ta), Some(tb)) => Poll::Ready(Ok((ta, tb))),
            (ta, tb) => {
                a_out = ta;
                b_out = tb;
                Poll::Pending
            }
        }
    })
    .await
}
