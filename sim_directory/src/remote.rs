//! Counted references handed out by the simulated directory

use crate::fault_injection::{DiscoveryFault, EnumerationFault, NAMESPACES};
use crate::model::{normalize, Shape, SimAttribute, SimObject, SimValue};
use crate::translate::{self, Translation};
use crate::{lock, Shared, SimProvider};
use ads_path::AdsPath;
use ads_types::{BindFlags, Capability, Credentials, NameFormat, NameInitType};
use provider_api::{
    AttrValue, AttributeArray, AttributeData, DirectoryComputer, DirectoryContainer,
    DirectoryGroup, DirectoryMembers, DirectoryObject, DirectoryUser, Interface, LargeInteger,
    NameTranslate, ObjectBinder, ObjectEnumerator, ProviderError, ProviderResult, RemoteObject,
    RemoteRef,
};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use tracing::trace;

const MEMBER: &str = "member";

/// What a reference points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Target {
    Namespaces,
    Provider(usize),
    Entry(String),
    Members(String),
    LargeInteger { high: i32, low: i32 },
    Opaque,
    Translator,
}

fn no_such_object() -> ProviderError {
    ProviderError::from_code(0x8007_2030, "There is no such object on the server.")
}

fn logon_failure() -> ProviderError {
    ProviderError::from_code(
        0x8007_052E,
        "The user name or password is incorrect.",
    )
}

fn unspecified() -> ProviderError {
    ProviderError::from_code(0x8000_4005, "Unspecified error")
}

pub(crate) struct SimRef {
    shared: Arc<Shared>,
    target: Target,
    filter: Mutex<Vec<String>>,
    staged: Mutex<Vec<(String, SimValue)>>,
    translation: Mutex<Translation>,
}

impl SimRef {
    pub(crate) fn boxed(shared: &Arc<Shared>, target: Target) -> Box<SimRef> {
        let live = shared.live.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(kind = ?target, live, "sim reference acquired");
        Box::new(SimRef {
            shared: Arc::clone(shared),
            target,
            filter: Mutex::new(Vec::new()),
            staged: Mutex::new(Vec::new()),
            translation: Mutex::new(Translation::default()),
        })
    }

    fn provider(&self) -> ProviderResult<&SimProvider> {
        match self.target {
            Target::Provider(index) => self.shared.providers.get(index).ok_or_else(unspecified),
            _ => Err(ProviderError::NoInterface),
        }
    }

    fn entry_path(&self) -> ProviderResult<&str> {
        match &self.target {
            Target::Entry(path) | Target::Members(path) => Ok(path),
            _ => Err(ProviderError::NoInterface),
        }
    }

    fn with_entry<R>(&self, f: impl FnOnce(&SimObject) -> ProviderResult<R>) -> ProviderResult<R> {
        let path = self.entry_path()?;
        let objects = lock(&self.shared.objects);
        let obj = objects
            .iter()
            .find(|obj| obj.path == path)
            .ok_or_else(no_such_object)?;
        f(obj)
    }

    fn with_entry_mut<R>(
        &self,
        f: impl FnOnce(&mut SimObject) -> ProviderResult<R>,
    ) -> ProviderResult<R> {
        let path = self.entry_path()?;
        let mut objects = lock(&self.shared.objects);
        let obj = objects
            .iter_mut()
            .find(|obj| obj.path == path)
            .ok_or_else(no_such_object)?;
        f(obj)
    }

    fn discovery_fault(&self, pred: impl Fn(&DiscoveryFault) -> bool) -> ProviderResult<bool> {
        let provider = self.provider()?;
        Ok(self.shared.faults.discovery_hits(&provider.scheme, pred))
    }

    fn supports(&self, capability: Capability) -> bool {
        if capability == Capability::Unknown {
            return true;
        }
        match &self.target {
            Target::Namespaces => capability == Capability::Container,
            Target::Provider(_) => match capability {
                Capability::Object => true,
                Capability::OpenDsObject => !self
                    .discovery_fault(|f| matches!(f, DiscoveryFault::Binder { .. }))
                    .unwrap_or(true),
                _ => false,
            },
            Target::Entry(_) => self
                .with_entry(|obj| Ok(obj.supports(capability)))
                .unwrap_or(false),
            Target::Members(_) => capability == Capability::Members,
            Target::LargeInteger { .. } => capability == Capability::LargeInteger,
            Target::Opaque => false,
            Target::Translator => capability == Capability::NameTranslate,
        }
    }

    fn first_string(&self, name: &str) -> ProviderResult<String> {
        self.with_entry(|obj| match first_value(obj, name)? {
            SimValue::String(s) => Ok(s.clone()),
            _ => Err(ProviderError::CantConvertDatatype),
        })
    }

    fn to_attr_value(&self, value: &SimValue) -> AttrValue {
        match value {
            SimValue::String(s) => AttrValue::String(s.clone()),
            SimValue::Bool(b) => AttrValue::Bool(*b),
            SimValue::Int32(v) => AttrValue::Int32(*v),
            SimValue::Int64(v) => AttrValue::Int64(*v),
            SimValue::Bytes(b) => AttrValue::Bytes(b.clone()),
            SimValue::Identifier(id) => AttrValue::Identifier(*id),
            SimValue::LargeInteger { high, low } => AttrValue::ObjectRef(SimRef::boxed(
                &self.shared,
                Target::LargeInteger {
                    high: *high,
                    low: *low,
                },
            )),
            SimValue::Opaque => AttrValue::ObjectRef(SimRef::boxed(&self.shared, Target::Opaque)),
        }
    }

    fn enumerator(&self, container: String, items: Vec<Target>) -> Box<dyn ObjectEnumerator> {
        Box::new(SimEnumerator::new(&self.shared, container, items))
    }

    fn children(&self) -> ProviderResult<(String, Vec<Target>)> {
        let filter = lock(&self.filter).clone();
        match &self.target {
            Target::Namespaces => Ok((
                NAMESPACES.to_string(),
                (0..self.shared.providers.len()).map(Target::Provider).collect(),
            )),
            Target::Entry(path) => {
                let objects = lock(&self.shared.objects);
                let items = objects
                    .iter()
                    .filter(|obj| obj.parent == *path && obj.matches_filter(&filter))
                    .map(|obj| Target::Entry(obj.path.clone()))
                    .collect();
                Ok((path.clone(), items))
            }
            Target::Members(path) => {
                let objects = lock(&self.shared.objects);
                let group = objects
                    .iter()
                    .find(|obj| obj.path == *path)
                    .ok_or_else(no_such_object)?;
                let items = member_paths(group)
                    .into_iter()
                    .filter_map(|member| objects.iter().find(|obj| obj.path == member))
                    .filter(|obj| obj.matches_filter(&filter))
                    .map(|obj| Target::Entry(obj.path.clone()))
                    .collect();
                Ok((path.clone(), items))
            }
            _ => Err(ProviderError::NoInterface),
        }
    }
}

impl Drop for SimRef {
    fn drop(&mut self) {
        let live = self.shared.live.fetch_sub(1, Ordering::SeqCst) - 1;
        trace!(kind = ?self.target, live, "sim reference released");
    }
}

fn first_value<'a>(obj: &'a SimObject, name: &str) -> ProviderResult<&'a SimValue> {
    obj.attributes
        .get(name)
        .and_then(|attr| attr.values.first())
        .ok_or(ProviderError::PropertyNotFound)
}

fn member_paths(group: &SimObject) -> Vec<String> {
    group
        .attributes
        .get(MEMBER)
        .map(|attr| {
            attr.values
                .iter()
                .filter_map(|value| match value {
                    SimValue::String(s) => Some(normalize(s)),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn from_attr_value(value: AttrValue) -> ProviderResult<SimValue> {
    Ok(match value {
        AttrValue::String(s) => SimValue::String(s),
        AttrValue::Bool(b) => SimValue::Bool(b),
        AttrValue::Int32(v) => SimValue::Int32(v),
        AttrValue::Int64(v) => SimValue::Int64(v),
        AttrValue::Bytes(b) => SimValue::Bytes(b),
        AttrValue::Identifier(id) => SimValue::Identifier(id),
        AttrValue::ObjectRef(_) => return Err(ProviderError::CantConvertDatatype),
    })
}

impl RemoteObject for SimRef {
    fn query(&self, capability: Capability) -> ProviderResult<Interface> {
        if !self.supports(capability) {
            return Err(ProviderError::NoInterface);
        }
        let fresh = SimRef::boxed(&self.shared, self.target.clone());
        Ok(match capability {
            Capability::Unknown => Interface::Unknown(fresh),
            Capability::Object => Interface::Object(fresh),
            Capability::Container => Interface::Container(fresh),
            Capability::Group => Interface::Group(fresh),
            Capability::User => Interface::User(fresh),
            Capability::Computer => Interface::Computer(fresh),
            Capability::Members => Interface::Members(fresh),
            Capability::OpenDsObject => Interface::Binder(fresh),
            Capability::LargeInteger => Interface::LargeInteger(fresh),
            Capability::NameTranslate => Interface::NameTranslate(fresh),
        })
    }
}

impl DirectoryObject for SimRef {
    fn name(&self) -> ProviderResult<String> {
        if let Target::Provider(_) = self.target {
            if self.discovery_fault(|f| matches!(f, DiscoveryFault::Name { .. }))? {
                return Err(unspecified());
            }
            return Ok(format!("{}:", self.provider()?.scheme));
        }
        self.with_entry(|obj| Ok(obj.name.clone()))
    }

    fn class(&self) -> ProviderResult<String> {
        if let Target::Provider(_) = self.target {
            return Ok("Namespace".to_string());
        }
        self.with_entry(|obj| Ok(obj.class.clone()))
    }

    fn guid(&self) -> ProviderResult<String> {
        if let Target::Provider(_) = self.target {
            if self.discovery_fault(|f| matches!(f, DiscoveryFault::Guid { .. }))? {
                return Ok("not-a-guid".to_string());
            }
            return Ok(self.provider()?.id.braced().to_string());
        }
        self.with_entry(|obj| Ok(obj.guid.clone()))
    }

    fn ads_path(&self) -> ProviderResult<String> {
        if let Target::Provider(_) = self.target {
            return Ok(format!("{}:", self.provider()?.scheme));
        }
        self.with_entry(|obj| Ok(obj.path.clone()))
    }

    fn parent(&self) -> ProviderResult<String> {
        if let Target::Provider(_) = self.target {
            return Ok(NAMESPACES.to_string());
        }
        self.with_entry(|obj| Ok(obj.parent.clone()))
    }

    fn schema(&self) -> ProviderResult<String> {
        self.with_entry(|obj| {
            let scheme = AdsPath::parse(&obj.path)
                .map(|p| p.scheme().to_string())
                .unwrap_or_default();
            Ok(format!("{}://schema/{}", scheme, obj.class))
        })
    }

    fn get_ex(&self, name: &str) -> ProviderResult<AttributeData> {
        self.with_entry(|obj| {
            let attr = obj
                .attributes
                .get(name)
                .ok_or(ProviderError::PropertyNotFound)?;
            let values: Vec<AttrValue> = attr.values.iter().map(|v| self.to_attr_value(v)).collect();
            Ok(match attr.shape {
                Shape::Array => AttributeData::Array(AttributeArray::new(values)),
                Shape::Scalar => values
                    .into_iter()
                    .next()
                    .map(AttributeData::Scalar)
                    .ok_or(ProviderError::PropertyNotFound)?,
                Shape::Dimensions(dimensions) => {
                    AttributeData::Array(AttributeArray::new(values).with_dimensions(dimensions))
                }
                Shape::Untagged => AttributeData::Array(AttributeArray::new(values).untagged()),
            })
        })
    }

    fn put(&self, name: &str, value: AttrValue) -> ProviderResult<()> {
        self.entry_path()?;
        let value = from_attr_value(value)?;
        lock(&self.staged).push((name.to_string(), value));
        Ok(())
    }

    fn set_info(&self) -> ProviderResult<()> {
        let staged: Vec<(String, SimValue)> = lock(&self.staged).drain(..).collect();
        self.with_entry_mut(|obj| {
            for (name, value) in staged {
                obj.attributes
                    .insert(name, SimAttribute::new(vec![value]));
            }
            Ok(())
        })
    }

    fn get_info_ex(&self, names: &[String]) -> ProviderResult<()> {
        let path = self.entry_path()?.to_string();
        lock(&self.shared.prefetches).push((path, names.to_vec()));
        Ok(())
    }
}

impl DirectoryContainer for SimRef {
    fn new_enum(&self) -> ProviderResult<Box<dyn ObjectEnumerator>> {
        let (container, items) = self.children()?;
        Ok(self.enumerator(container, items))
    }

    fn filter(&self) -> ProviderResult<Vec<String>> {
        Ok(lock(&self.filter).clone())
    }

    fn set_filter(&self, classes: &[String]) -> ProviderResult<()> {
        *lock(&self.filter) = classes.to_vec();
        Ok(())
    }

    fn get_object(&self, class: &str, name: &str) -> ProviderResult<RemoteRef> {
        let parent = self.entry_path()?;
        let objects = lock(&self.shared.objects);
        let child = objects
            .iter()
            .find(|obj| {
                obj.parent == parent
                    && obj.name.eq_ignore_ascii_case(name)
                    && (class.is_empty() || obj.class.eq_ignore_ascii_case(class))
            })
            .ok_or_else(no_such_object)?;
        Ok(SimRef::boxed(&self.shared, Target::Entry(child.path.clone())))
    }
}

impl DirectoryGroup for SimRef {
    fn description(&self) -> ProviderResult<String> {
        self.first_string("description")
    }

    fn members(&self) -> ProviderResult<Box<dyn DirectoryMembers>> {
        let path = self.entry_path()?.to_string();
        Ok(SimRef::boxed(&self.shared, Target::Members(path)))
    }

    fn add(&self, path: &str) -> ProviderResult<()> {
        let member = normalize(path);
        self.with_entry_mut(|group| {
            let attr = group
                .attributes
                .entry(MEMBER.to_string())
                .or_insert_with(|| SimAttribute::new(Vec::new()));
            let present = attr
                .values
                .iter()
                .any(|v| matches!(v, SimValue::String(s) if normalize(s) == member));
            if present {
                return Err(ProviderError::ObjectExists);
            }
            attr.values.push(SimValue::String(member));
            Ok(())
        })
    }

    fn remove(&self, path: &str) -> ProviderResult<()> {
        let member = normalize(path);
        self.with_entry_mut(|group| {
            let attr = group
                .attributes
                .get_mut(MEMBER)
                .ok_or(ProviderError::PropertyNotFound)?;
            let before = attr.values.len();
            attr.values
                .retain(|v| !matches!(v, SimValue::String(s) if normalize(s) == member));
            if attr.values.len() == before {
                return Err(ProviderError::from_code(
                    0x8007_0561,
                    "The specified account name is not a member of the group.",
                ));
            }
            Ok(())
        })
    }
}

impl DirectoryMembers for SimRef {
    fn new_enum(&self) -> ProviderResult<Box<dyn ObjectEnumerator>> {
        DirectoryContainer::new_enum(self)
    }

    fn filter(&self) -> ProviderResult<Vec<String>> {
        DirectoryContainer::filter(self)
    }

    fn set_filter(&self, classes: &[String]) -> ProviderResult<()> {
        DirectoryContainer::set_filter(self, classes)
    }
}

impl DirectoryUser for SimRef {
    fn account_disabled(&self) -> ProviderResult<bool> {
        self.with_entry(|obj| match first_value(obj, "accountDisabled")? {
            SimValue::Bool(b) => Ok(*b),
            _ => Err(ProviderError::CantConvertDatatype),
        })
    }

    fn set_account_disabled(&self, disabled: bool) -> ProviderResult<()> {
        self.put("accountDisabled", AttrValue::Bool(disabled))
    }

    fn full_name(&self) -> ProviderResult<String> {
        self.first_string("fullName")
    }
}

impl DirectoryComputer for SimRef {
    fn computer_id(&self) -> ProviderResult<String> {
        self.first_string("computerId")
    }

    fn site(&self) -> ProviderResult<String> {
        self.first_string("site")
    }

    fn operating_system(&self) -> ProviderResult<String> {
        self.first_string("operatingSystem")
    }
}

impl ObjectBinder for SimRef {
    fn open_ds_object(
        &self,
        path: &str,
        credentials: &Credentials,
        flags: BindFlags,
    ) -> ProviderResult<RemoteRef> {
        let provider = self.provider()?;
        let shared = &self.shared;

        if !credentials.is_current_context()
            && !shared.credentials.is_empty()
            && !shared
                .credentials
                .iter()
                .any(|(user, password)| user == credentials.user() && password == credentials.password())
        {
            return Err(logon_failure());
        }

        let key = normalize(path);
        lock(&shared.binds).push((key.clone(), flags));

        if let Some(err) = shared.faults.bind_error(&key) {
            return Err(err);
        }

        let parsed = AdsPath::parse(path).map_err(|_| ProviderError::BadPathname)?;
        if parsed.scheme() != provider.scheme {
            return Err(ProviderError::BadPathname);
        }
        if parsed.is_namespace_root() {
            return Ok(SimRef::boxed(shared, self.target.clone()));
        }

        let exists = lock(&shared.objects).iter().any(|obj| obj.path == key);
        if !exists {
            return Err(no_such_object());
        }
        Ok(SimRef::boxed(shared, Target::Entry(key)))
    }
}

impl LargeInteger for SimRef {
    fn high_part(&self) -> ProviderResult<i32> {
        match self.target {
            Target::LargeInteger { high, .. } => Ok(high),
            _ => Err(ProviderError::NoInterface),
        }
    }

    fn low_part(&self) -> ProviderResult<i32> {
        match self.target {
            Target::LargeInteger { low, .. } => Ok(low),
            _ => Err(ProviderError::NoInterface),
        }
    }
}

impl SimRef {
    fn translator(&self) -> ProviderResult<()> {
        match self.target {
            Target::Translator => Ok(()),
            _ => Err(ProviderError::NoInterface),
        }
    }

    fn netbios_domain(&self) -> Option<&str> {
        self.shared.netbios_domain.as_deref()
    }
}

impl NameTranslate for SimRef {
    fn init(&self, path: &str, init_type: NameInitType) -> ProviderResult<()> {
        self.translator()?;
        if init_type.requires_name() && path.is_empty() {
            return Err(ProviderError::BadParameter);
        }
        if init_type == NameInitType::Domain {
            let objects = lock(&self.shared.objects);
            if !translate::domain_known(&objects, path, self.netbios_domain()) {
                return Err(translate::no_such_domain());
            }
        }
        *lock(&self.translation) = Translation {
            initialized: true,
            current: None,
        };
        Ok(())
    }

    fn set(&self, name: &str, format: NameFormat) -> ProviderResult<()> {
        self.translator()?;
        let mut state = lock(&self.translation);
        if !state.initialized {
            return Err(ProviderError::ObjectUnbound);
        }
        if !translate::accepts_input(format) {
            return Err(ProviderError::BadParameter);
        }
        state.current = None;
        let objects = lock(&self.shared.objects);
        state.current = Some(translate::find(&objects, name, format, self.netbios_domain())?);
        Ok(())
    }

    fn get(&self, format: NameFormat) -> ProviderResult<String> {
        self.translator()?;
        let state = lock(&self.translation);
        if !state.initialized {
            return Err(ProviderError::ObjectUnbound);
        }
        if !translate::produces(format) {
            return Err(ProviderError::BadParameter);
        }
        let path = state.current.as_deref().ok_or(ProviderError::PropertyNotSet)?;
        let objects = lock(&self.shared.objects);
        let obj = objects
            .iter()
            .find(|obj| obj.path == path)
            .ok_or_else(translate::not_found)?;
        translate::name_of(obj, format, self.netbios_domain()).ok_or_else(translate::no_mapping)
    }
}

/// Counted cursor over a snapshot of a container's children
struct SimEnumerator {
    shared: Arc<Shared>,
    container: String,
    items: Vec<Target>,
    position: usize,
}

impl SimEnumerator {
    fn new(shared: &Arc<Shared>, container: String, items: Vec<Target>) -> Self {
        shared.live.fetch_add(1, Ordering::SeqCst);
        Self {
            shared: Arc::clone(shared),
            container,
            items,
            position: 0,
        }
    }
}

impl ObjectEnumerator for SimEnumerator {
    fn next(&mut self) -> ProviderResult<Option<AttrValue>> {
        let Some(target) = self.items.get(self.position).cloned() else {
            return Ok(None);
        };
        let index = self.position;
        self.position += 1;

        match self.shared.faults.enumeration_fault(&self.container, index) {
            Some(EnumerationFault::NonObjectAt { .. }) => {
                Ok(Some(AttrValue::String("not an object".to_string())))
            }
            Some(EnumerationFault::ErrorAt { error, .. }) => Err(error.clone()),
            None => Ok(Some(AttrValue::ObjectRef(SimRef::boxed(&self.shared, target)))),
        }
    }
}

impl Drop for SimEnumerator {
    fn drop(&mut self) {
        self.shared.live.fetch_sub(1, Ordering::SeqCst);
    }
}
