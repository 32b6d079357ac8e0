pub use error::{ClientError, LookupError, ObjectError};
use {
    crate::{
        client::objects::Objects,
        object::{Interface, Object, ObjectId},
        state::State,
        utils::{errorfmt::ErrorFmt, numcell::NumCell},
        wire::{Event, Request},
    },
    ahash::AHashMap,
    std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        error::Error,
        fmt::{Debug, Display, Formatter},
        mem,
        rc::Rc,
    },
};

mod error;
pub mod objects;

#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct ClientId(u64);

impl ClientId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

pub struct Clients {
    next_client_id: NumCell<u64>,
    clients: RefCell<AHashMap<ClientId, ClientHolder>>,
}

impl Default for Clients {
    fn default() -> Self {
        Self::new()
    }
}

impl Clients {
    pub fn new() -> Self {
        Self {
            next_client_id: NumCell::new(1),
            clients: Default::default(),
        }
    }

    pub fn clear(&self) {
        let _clients = mem::take(&mut *self.clients.borrow_mut());
    }

    pub fn id(&self) -> ClientId {
        ClientId(self.next_client_id.fetch_add(1))
    }

    pub fn get(&self, id: ClientId) -> Result<Rc<Client>, ClientError> {
        match self.clients.borrow().get(&id) {
            Some(c) => Ok(c.data.clone()),
            _ => Err(ClientError::ClientDoesNotExist(id)),
        }
    }

    pub fn len(&self) -> usize {
        self.clients.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.borrow().is_empty()
    }

    /// Registers a newly connected session.
    pub fn spawn(&self, state: &Rc<State>) -> Rc<Client> {
        let id = self.id();
        let data = Rc::new(Client {
            id,
            state: state.clone(),
            objects: Objects::new(),
            outgoing: Default::default(),
            connected: Cell::new(true),
        });
        log::info!("Client {} connected", id);
        self.clients.borrow_mut().insert(
            id,
            ClientHolder {
                data: data.clone(),
            },
        );
        data
    }

    pub fn kill(&self, client: ClientId) {
        let holder = self.clients.borrow_mut().remove(&client);
        if holder.is_some() {
            log::info!("Removing client {}", client);
        }
    }

    pub fn broadcast<B>(&self, mut f: B)
    where
        B: FnMut(&Rc<Client>),
    {
        let clients: Vec<_> = self
            .clients
            .borrow()
            .values()
            .map(|c| c.data.clone())
            .collect();
        for client in &clients {
            f(client);
        }
    }
}

impl Drop for Clients {
    fn drop(&mut self) {
        let _clients = mem::take(&mut *self.clients.borrow_mut());
    }
}

struct ClientHolder {
    data: Rc<Client>,
}

impl Drop for ClientHolder {
    fn drop(&mut self) {
        self.data.connected.set(false);
        self.data.objects.destroy();
    }
}

pub trait EventFormatter: Debug {
    fn id(&self) -> ObjectId;
    fn interface(&self) -> Interface;
    fn into_event(self) -> Event;
}

pub trait RequestMessage: Debug + Into<Request> {
    fn self_id(&self) -> ObjectId;
}

pub struct Client {
    pub id: ClientId,
    pub state: Rc<State>,
    pub objects: Objects,
    outgoing: RefCell<VecDeque<Event>>,
    connected: Cell<bool>,
}

impl Client {
    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    pub fn new_id<T: From<ObjectId>>(&self) -> Result<T, ClientError> {
        self.objects.id(self).map(T::from)
    }

    /// Handles a request sent by the client.
    ///
    /// Any error is fatal: it is logged and the client is disconnected before the error is
    /// returned to the transport.
    pub fn request<R: RequestMessage>(self: &Rc<Self>, request: R) -> Result<(), ClientError> {
        let res = self.handle_request(request);
        if let Err(e) = &res {
            self.error(e);
        }
        res
    }

    fn handle_request<R: RequestMessage>(&self, request: R) -> Result<(), ClientError> {
        if !self.connected.get() {
            return Err(ClientError::Disconnected);
        }
        let id = request.self_id();
        let obj = match self.objects.get_obj(id) {
            Ok(obj) => obj,
            Err(_) => return Err(ClientError::InvalidObject(id)),
        };
        log::trace!(
            "Client {} -> {}@{}.{:?}",
            self.id,
            obj.interface().name(),
            id,
            request
        );
        obj.handle_request(request.into())
    }

    pub fn error(&self, message: impl Error) {
        log::error!(
            "Client {}: A fatal error occurred: {}",
            self.id,
            ErrorFmt(message),
        );
        self.state.clients.kill(self.id);
    }

    pub fn event<T: EventFormatter>(&self, event: T) {
        if !self.connected.get() {
            return;
        }
        if log::log_enabled!(log::Level::Trace) {
            self.log_event(&event);
        }
        self.outgoing.borrow_mut().push_back(event.into_event());
    }

    /// Removes all events that have been queued for the client.
    pub fn flush(&self) -> VecDeque<Event> {
        mem::take(&mut *self.outgoing.borrow_mut())
    }

    fn log_event<T: EventFormatter>(&self, event: &T) {
        log::trace!(
            "Client {} <= {}@{}.{:?}",
            self.id,
            event.interface().name(),
            event.id(),
            event,
        );
    }

    pub fn add_client_obj<T: WaylandObject>(&self, obj: &Rc<T>) -> Result<(), ClientError> {
        self.objects.add_client_object(obj.clone())?;
        obj.clone().add(self);
        Ok(())
    }

    pub fn add_server_obj<T: WaylandObject>(&self, obj: &Rc<T>) -> Result<(), ClientError> {
        self.objects.add_server_object(obj.clone())?;
        obj.clone().add(self);
        Ok(())
    }

    pub fn remove_obj<T: WaylandObject>(&self, obj: &T) -> Result<(), ClientError> {
        obj.remove(self);
        self.objects.remove_obj(obj.id())
    }

    pub fn lookup<Id: WaylandObjectLookup>(&self, id: Id) -> Result<Rc<Id::Object>, ClientError> {
        match Id::lookup(self, id) {
            Some(t) => Ok(t),
            _ => Err(ClientError::LookupError(LookupError {
                interface: Id::INTERFACE,
                id: id.into(),
            })),
        }
    }
}

pub trait WaylandObject: Object {
    fn add(self: Rc<Self>, client: &Client) {
        let _ = client;
    }
    fn remove(&self, client: &Client) {
        let _ = client;
    }
}

pub trait WaylandObjectLookup: Copy + Into<ObjectId> {
    type Object;
    const INTERFACE: Interface;

    fn lookup(client: &Client, id: Self) -> Option<Rc<Self::Object>>;
}
